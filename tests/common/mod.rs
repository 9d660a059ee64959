//! Shared destination fixtures for the integration suite.
//!
//! Models a small plugin-style configuration: a named element carrying a
//! list of dynamically-typed entries, each selecting its payload shape via a
//! `type` discriminator in the document.
#![allow(dead_code)]

use treebind::{Bind, DynamicVariant, Field, FieldTable, Slot};

#[derive(Default, Debug, PartialEq)]
pub struct Config {
    pub element: ConfigElement,
}

impl FieldTable for Config {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![Field::nested("config", &mut self.element)]
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct ConfigElement {
    pub name: String,
    pub dyn_elements: Vec<DynElement>,
}

impl FieldTable for ConfigElement {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("name", self.name.slot()),
            Field::from_tag("dynelement,dynamic=type", self.dyn_elements.slot()),
        ]
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct DynElement {
    pub kind: String,
    pub payload: Payload,
}

impl FieldTable for DynElement {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("type", self.kind.slot()),
            Field::new("config", self.payload.slot()),
        ]
    }
}

impl DynamicVariant for DynElement {
    fn resolve_variant(&mut self, discriminator: &str) {
        self.payload = match discriminator {
            "myfloat" => Payload::Float(FloatSettings::default()),
            "myint" => Payload::Int(IntSettings::default()),
            _ => Payload::Unset,
        };
    }
}

#[derive(Default, Debug, PartialEq)]
pub enum Payload {
    #[default]
    Unset,
    Float(FloatSettings),
    Int(IntSettings),
}

impl Bind for Payload {
    fn slot(&mut self) -> Slot<'_> {
        match self {
            Payload::Unset => Slot::Ignore,
            Payload::Float(settings) => Slot::Mapping(settings),
            Payload::Int(settings) => Slot::Mapping(settings),
        }
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct FloatSettings {
    pub key: String,
    pub value: f64,
}

impl FieldTable for FloatSettings {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("keyfloat", self.key.slot()),
            Field::new("valuefloat", self.value.slot()),
        ]
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct IntSettings {
    pub key: String,
    pub value: i64,
}

impl FieldTable for IntSettings {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("keyint", self.key.slot()),
            Field::new("valueint", self.value.slot()),
        ]
    }
}

treebind::bind_mapping!(Config, ConfigElement, FloatSettings, IntSettings);
treebind::bind_dynamic!(DynElement);
