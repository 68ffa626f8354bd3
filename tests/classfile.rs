//! Class files from disk through the repository and into a generated program.

use std::fs;

use tempfile::TempDir;

use jvmscope::prelude::*;

fn utf8(out: &mut Vec<u8>, text: &str) {
    out.push(1);
    out.extend_from_slice(&(text.len() as u16).to_be_bytes());
    out.extend_from_slice(text.as_bytes());
}

fn u16s(out: &mut Vec<u8>, values: &[u16]) {
    for value in values {
        out.extend_from_slice(&value.to_be_bytes());
    }
}

/// `public class demo.Hello` with `static final int ANSWER = 42` and
/// `public static native void main(String[])`
fn hello_class() -> Vec<u8> {
    let mut data = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34];

    u16s(&mut data, &[13]);
    utf8(&mut data, "demo/Hello"); // #1
    data.extend_from_slice(&[7, 0, 1]); // #2
    utf8(&mut data, "java/lang/Object"); // #3
    data.extend_from_slice(&[7, 0, 3]); // #4
    utf8(&mut data, "ANSWER"); // #5
    utf8(&mut data, "I"); // #6
    utf8(&mut data, "ConstantValue"); // #7
    data.extend_from_slice(&[3, 0, 0, 0, 42]); // #8
    utf8(&mut data, "main"); // #9
    utf8(&mut data, "([Ljava/lang/String;)V"); // #10
    utf8(&mut data, "SourceFile"); // #11
    utf8(&mut data, "Hello.java"); // #12

    u16s(&mut data, &[0x0021, 2, 4, 0]);
    // fields
    u16s(&mut data, &[1, 0x0018, 5, 6, 1, 7, 0, 2, 8]);
    // methods
    u16s(&mut data, &[1, 0x0109, 9, 10, 0]);
    // attributes
    u16s(&mut data, &[1, 11, 0, 2, 12]);
    data
}

/// A class-path root holding `demo/Hello.class`
fn class_path_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("demo")).unwrap();
    fs::write(dir.path().join("demo").join("Hello.class"), hello_class()).unwrap();
    dir
}

#[test]
fn parse_in_memory() {
    let class = ClassFile::from_mem(hello_class()).unwrap();
    assert_eq!(class.this_class, "demo.Hello");
    assert_eq!(class.super_class.as_deref(), Some("java.lang.Object"));
    assert_eq!(class.source_file(), Some("Hello.java"));

    let model = class.model().unwrap();
    assert_eq!(model.fields.len(), 1);
    assert_eq!(
        model.fields[0].constant_value,
        Some(ConstantLiteral::Integer(42))
    );
    assert_eq!(model.methods[0].argument_signatures, vec!["[Ljava/lang/String;"]);
    assert_eq!(model.methods[0].argument_names, vec!["arg0"]);
}

#[test]
fn lookup_and_generate() {
    let dir = class_path_root();
    let repository = ClassRepository::new(ClassPath::new().with_entry(dir.path()).unwrap());

    let model = repository.lookup("demo.Hello").unwrap();
    let mut out = Vec::new();
    bcelify(&model, &mut out, &EmitterConfig::default()).unwrap();
    let program = String::from_utf8(out).unwrap();

    assert!(program.starts_with("package demo;\n"));
    assert!(program.contains(
        "new ClassGen(\"demo.Hello\", \"java.lang.Object\", \"Hello.java\", ACC_PUBLIC | ACC_SUPER"
    ));
    assert!(program.contains("new FieldGen(ACC_STATIC | ACC_FINAL, Type.INT, \"ANSWER\", _cp);"));
    assert!(program.contains("field.setInitValue(42);"));
    assert!(program.contains(
        "new MethodGen(ACC_PUBLIC | ACC_STATIC | ACC_NATIVE, Type.VOID, \
         new Type[] { new ArrayType(Type.STRING, 1) }, new String[] { \"arg0\" }, \
         \"main\", \"demo.Hello\", il, _cp);"
    ));
}

#[test]
fn missing_class_is_reported_before_translation() {
    let dir = class_path_root();
    let repository = ClassRepository::new(ClassPath::new().with_entry(dir.path()).unwrap());

    match repository.lookup("demo.Goodbye") {
        Err(Error::ClassNotFound(name)) => assert_eq!(name, "demo.Goodbye"),
        other => panic!("expected ClassNotFound, got {other:?}"),
    }
}

#[test]
fn damaged_files() {
    let data = hello_class();

    assert!(matches!(
        ClassFile::from_mem(data[..40].to_vec()),
        Err(Error::OutOfBounds)
    ));

    let mut wrong_magic = data.clone();
    wrong_magic[3] = 0xBF;
    assert!(matches!(
        ClassFile::from_mem(wrong_magic),
        Err(Error::NotSupported)
    ));

    // this_class pointing at a Utf8 entry
    let mut bad_index = data;
    let header = bad_index.len() - 2 * (4 + 9 + 5 + 5);
    bad_index[header + 3] = 1;
    assert!(matches!(
        ClassFile::from_mem(bad_index),
        Err(Error::Malformed { .. })
    ));
}
