use super::Backend;

/// Class bytes held in an owned buffer
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Take ownership of `data`
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_the_buffer() {
        let memory = Memory::new(vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34]);

        assert_eq!(memory.len(), 8);
        assert_eq!(&memory.data()[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
    }

    #[test]
    fn empty_buffer() {
        let memory = Memory::new(Vec::new());

        assert_eq!(memory.len(), 0);
        assert!(memory.data().is_empty());
    }
}
