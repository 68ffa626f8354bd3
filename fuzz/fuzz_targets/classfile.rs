#![no_main]

use jvmscope::{assembler::assemble, ClassFile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(class) = ClassFile::from_mem(data.to_vec()) {
        if let Ok(model) = class.model() {
            let _ = assemble(&model);
        }
    }
});
