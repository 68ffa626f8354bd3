//! In-memory class-file writer for tests.
//!
//! Produces minimal but well-formed class files: a deduplicated constant pool, the class
//! header, fields with optional `ConstantValue`, and methods with an optional `Code` attribute
//! carrying a `LocalVariableTable`.

use std::collections::HashMap;

use crate::model::ConstantLiteral;

/// A local variable row: name, descriptor, slot
pub type LocalRow<'a> = (&'a str, &'a str, u16);

/// Builder for class-file bytes
#[derive(Default)]
pub struct ClassBytes {
    pool: Vec<u8>,
    next_index: u16,
    utf8_cache: HashMap<String, u16>,
    class_cache: HashMap<String, u16>,
    access_flags: u16,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    fields: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
    attributes: Vec<Vec<u8>>,
}

impl ClassBytes {
    pub fn new() -> Self {
        ClassBytes {
            next_index: 1,
            ..Default::default()
        }
    }

    fn push_entry(&mut self, entry: &[u8], slots: u16) -> u16 {
        let index = self.next_index;
        self.pool.extend_from_slice(entry);
        self.next_index += slots;
        index
    }

    pub fn utf8(&mut self, text: &str) -> u16 {
        if let Some(index) = self.utf8_cache.get(text) {
            return *index;
        }

        let mut entry = vec![1];
        entry.extend_from_slice(&(text.len() as u16).to_be_bytes());
        entry.extend_from_slice(text.as_bytes());
        let index = self.push_entry(&entry, 1);
        self.utf8_cache.insert(text.to_string(), index);
        index
    }

    /// Class entry for an internal (`/` separated) name
    pub fn class(&mut self, internal_name: &str) -> u16 {
        if let Some(index) = self.class_cache.get(internal_name) {
            return *index;
        }

        let name = self.utf8(internal_name);
        let mut entry = vec![7];
        entry.extend_from_slice(&name.to_be_bytes());
        let index = self.push_entry(&entry, 1);
        self.class_cache.insert(internal_name.to_string(), index);
        index
    }

    pub fn literal(&mut self, value: &ConstantLiteral) -> u16 {
        match value {
            ConstantLiteral::Integer(v) => self.push_tagged(3, &v.to_be_bytes(), 1),
            ConstantLiteral::Float(v) => self.push_tagged(4, &v.to_be_bytes(), 1),
            ConstantLiteral::Long(v) => self.push_tagged(5, &v.to_be_bytes(), 2),
            ConstantLiteral::Double(v) => self.push_tagged(6, &v.to_be_bytes(), 2),
            ConstantLiteral::String(text) => {
                let text = self.utf8(text);
                self.push_tagged(8, &text.to_be_bytes(), 1)
            }
        }
    }

    fn push_tagged(&mut self, tag: u8, payload: &[u8], slots: u16) -> u16 {
        let mut entry = vec![tag];
        entry.extend_from_slice(payload);
        self.push_entry(&entry, slots)
    }

    /// `constant_pool_count` followed by the entries
    pub fn constant_pool_bytes(&self) -> Vec<u8> {
        let mut data = self.next_index.to_be_bytes().to_vec();
        data.extend_from_slice(&self.pool);
        data
    }

    pub fn header(&mut self, access_flags: u16, this_class: &str, super_class: Option<&str>) {
        self.access_flags = access_flags;
        self.this_class = self.class(this_class);
        self.super_class = super_class.map_or(0, |name| self.class(name));
    }

    pub fn interface(&mut self, internal_name: &str) {
        let index = self.class(internal_name);
        self.interfaces.push(index);
    }

    pub fn source_file(&mut self, name: &str) {
        let attribute = self.utf8("SourceFile");
        let value = self.utf8(name);
        let mut data = attribute.to_be_bytes().to_vec();
        data.extend_from_slice(&2_u32.to_be_bytes());
        data.extend_from_slice(&value.to_be_bytes());
        self.attributes.push(data);
    }

    pub fn field(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        constant: Option<ConstantLiteral>,
    ) {
        let mut attributes = Vec::new();
        if let Some(value) = constant {
            let attribute = self.utf8("ConstantValue");
            let index = self.literal(&value);
            let mut data = attribute.to_be_bytes().to_vec();
            data.extend_from_slice(&2_u32.to_be_bytes());
            data.extend_from_slice(&index.to_be_bytes());
            attributes.push(data);
        }

        let member = self.member(access_flags, name, descriptor, &attributes);
        self.fields.push(member);
    }

    /// Method without a `Code` attribute
    pub fn method(&mut self, access_flags: u16, name: &str, descriptor: &str) {
        let member = self.member(access_flags, name, descriptor, &[]);
        self.methods.push(member);
    }

    /// Method with a one-instruction `Code` attribute and a `LocalVariableTable`
    pub fn method_with_locals(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        locals: &[LocalRow],
    ) {
        let mut table = (locals.len() as u16).to_be_bytes().to_vec();
        for (local_name, local_descriptor, slot) in locals {
            let local_name = self.utf8(local_name);
            let local_descriptor = self.utf8(local_descriptor);
            table.extend_from_slice(&0_u16.to_be_bytes());
            table.extend_from_slice(&1_u16.to_be_bytes());
            table.extend_from_slice(&local_name.to_be_bytes());
            table.extend_from_slice(&local_descriptor.to_be_bytes());
            table.extend_from_slice(&slot.to_be_bytes());
        }

        let code_name = self.utf8("Code");
        let table_name = self.utf8("LocalVariableTable");

        let mut code = Vec::new();
        code.extend_from_slice(&4_u16.to_be_bytes());
        code.extend_from_slice(&8_u16.to_be_bytes());
        code.extend_from_slice(&1_u32.to_be_bytes());
        code.push(0xB1);
        code.extend_from_slice(&0_u16.to_be_bytes());
        code.extend_from_slice(&1_u16.to_be_bytes());
        code.extend_from_slice(&table_name.to_be_bytes());
        code.extend_from_slice(&(table.len() as u32).to_be_bytes());
        code.extend_from_slice(&table);

        let mut attribute = code_name.to_be_bytes().to_vec();
        attribute.extend_from_slice(&(code.len() as u32).to_be_bytes());
        attribute.extend_from_slice(&code);

        let member = self.member(access_flags, name, descriptor, &[attribute]);
        self.methods.push(member);
    }

    fn member(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        attributes: &[Vec<u8>],
    ) -> Vec<u8> {
        let name = self.utf8(name);
        let descriptor = self.utf8(descriptor);

        let mut data = access_flags.to_be_bytes().to_vec();
        data.extend_from_slice(&name.to_be_bytes());
        data.extend_from_slice(&descriptor.to_be_bytes());
        data.extend_from_slice(&(attributes.len() as u16).to_be_bytes());
        for attribute in attributes {
            data.extend_from_slice(attribute);
        }
        data
    }

    /// The complete class file, version 52.0
    pub fn build(&self) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0xCAFE_BABE_u32.to_be_bytes());
        data.extend_from_slice(&0_u16.to_be_bytes());
        data.extend_from_slice(&52_u16.to_be_bytes());
        data.extend_from_slice(&self.constant_pool_bytes());

        data.extend_from_slice(&self.access_flags.to_be_bytes());
        data.extend_from_slice(&self.this_class.to_be_bytes());
        data.extend_from_slice(&self.super_class.to_be_bytes());

        data.extend_from_slice(&(self.interfaces.len() as u16).to_be_bytes());
        for interface in &self.interfaces {
            data.extend_from_slice(&interface.to_be_bytes());
        }

        for table in [&self.fields, &self.methods, &self.attributes] {
            data.extend_from_slice(&(table.len() as u16).to_be_bytes());
            for entry in table {
                data.extend_from_slice(entry);
            }
        }
        data
    }
}
