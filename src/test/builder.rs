use crate::classfile::JAVA_MAGIC;

/// Builds synthetic class files with a chosen constant pool.
///
/// The declared count is derived from the records added, wide constants included, so the
/// result is always a well-formed prologue followed by the records and an optional trailer.
pub struct ClassBuilder {
    records: Vec<u8>,
    slots: u16,
    trailer: Vec<u8>,
}

impl ClassBuilder {
    pub fn new() -> Self {
        ClassBuilder {
            records: Vec::new(),
            slots: 0,
            trailer: Vec::new(),
        }
    }

    /// Appends raw record bytes occupying `slots` constant pool slots.
    pub fn raw(mut self, slots: u16, bytes: &[u8]) -> Self {
        self.records.extend_from_slice(bytes);
        self.slots += slots;
        self
    }

    pub fn utf8(self, text: &str) -> Self {
        let mut bytes = vec![0x01];
        bytes.extend_from_slice(&(text.len() as u16).to_be_bytes());
        bytes.extend_from_slice(text.as_bytes());
        self.raw(1, &bytes)
    }

    pub fn integer(self, value: i32) -> Self {
        let mut bytes = vec![0x03];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.raw(1, &bytes)
    }

    pub fn long(self, value: i64) -> Self {
        let mut bytes = vec![0x05];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.raw(2, &bytes)
    }

    pub fn double(self, value: f64) -> Self {
        let mut bytes = vec![0x06];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.raw(2, &bytes)
    }

    pub fn class(self, name_index: u16) -> Self {
        let mut bytes = vec![0x07];
        bytes.extend_from_slice(&name_index.to_be_bytes());
        self.raw(1, &bytes)
    }

    pub fn name_and_type(self, name_index: u16, descriptor_index: u16) -> Self {
        let mut bytes = vec![0x0C];
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&descriptor_index.to_be_bytes());
        self.raw(1, &bytes)
    }

    /// Bytes placed after the constant pool (access flags, this_class, ...).
    pub fn trailer(mut self, bytes: &[u8]) -> Self {
        self.trailer.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut data = Vec::with_capacity(10 + self.records.len() + self.trailer.len());
        data.extend_from_slice(&JAVA_MAGIC.to_be_bytes());
        data.extend_from_slice(&0_u16.to_be_bytes());
        data.extend_from_slice(&52_u16.to_be_bytes());
        data.extend_from_slice(&(self.slots + 1).to_be_bytes());
        data.extend_from_slice(&self.records);
        data.extend_from_slice(&self.trailer);
        data
    }
}
