//! Turns a [`ClassModel`] into an ordered list of [`EmissionRecord`]s.
//!
//! The output is one [`ClassHeader`], then one [`FieldDecl`] per field and one
//! [`MethodSkeleton`] per method, both in declaration order. Nothing is filtered, reordered or
//! merged. All decoding happens here, so an emitter only has to render finished values.
//!
//! # Examples
//!
//! ```rust
//! use jvmscope::{
//!     assembler::{assemble, EmissionRecord},
//!     model::{ClassModel, FieldModel},
//! };
//!
//! let mut model = ClassModel::new("com.example.Widget", "java.lang.Object", 0x0021);
//! model.fields.push(FieldModel::new("x", "I", 0x0011));
//!
//! let records = assemble(&model)?;
//! assert_eq!(records.len(), 2);
//! assert!(matches!(&records[0], EmissionRecord::ClassHeader(header) if header.name == "Widget"));
//! # Ok::<(), jvmscope::Error>(())
//! ```

mod records;

pub use records::*;

use crate::{
    access::{decode_access_flags, FlagRole},
    model::{ClassModel, FieldModel, MethodModel},
    signatures::decode_signature,
    Result,
};

/// Build the emission records for one class
///
/// ## Arguments
/// * 'model' - The resolved class
///
/// # Errors
/// Returns [`crate::Error::MalformedSignature`] or [`crate::Error::UnknownFlagBit`] if any
/// signature or mask in the class cannot be decoded. No partial result is returned.
pub fn assemble(model: &ClassModel) -> Result<Vec<EmissionRecord>> {
    let mut records = Vec::with_capacity(1 + model.fields.len() + model.methods.len());

    records.push(EmissionRecord::ClassHeader(class_header(model)?));
    for field in &model.fields {
        records.push(EmissionRecord::FieldDecl(field_decl(field)?));
    }
    for (index, method) in model.methods.iter().enumerate() {
        records.push(EmissionRecord::MethodSkeleton(method_skeleton(
            index,
            method,
            &model.class_name,
        )?));
    }

    log::debug!(
        "Assembled {} records for {} ({} fields, {} methods)",
        records.len(),
        model.class_name,
        model.fields.len(),
        model.methods.len()
    );
    Ok(records)
}

fn class_header(model: &ClassModel) -> Result<ClassHeader> {
    Ok(ClassHeader {
        name: model.simple_name().to_string(),
        package: model.package_name().map(str::to_string),
        super_name: model.superclass_name.clone(),
        source_file: model.source_file.clone(),
        flags: decode_access_flags(model.access_flags, FlagRole::Class)?,
        interfaces: model.interface_names.clone(),
    })
}

fn field_decl(field: &FieldModel) -> Result<FieldDecl> {
    log::trace!("Field {} : {}", field.name, field.signature);

    Ok(FieldDecl {
        name: field.name.clone(),
        field_type: decode_signature(&field.signature)?,
        flags: decode_access_flags(field.access_flags, FlagRole::Member)?,
        constant_value: field.constant_value.as_ref().map(ToString::to_string),
    })
}

fn method_skeleton(
    index: usize,
    method: &MethodModel,
    declaring_class: &str,
) -> Result<MethodSkeleton> {
    log::trace!("Method {} {}", method.name, method.descriptor);

    let arg_types = method
        .argument_signatures
        .iter()
        .map(|signature| decode_signature(signature))
        .collect::<Result<Vec<_>>>()?;

    Ok(MethodSkeleton {
        index,
        name: method.name.clone(),
        return_type: decode_signature(&method.return_signature)?,
        arg_types,
        arg_names: method.argument_names.clone(),
        flags: decode_access_flags(method.access_flags, FlagRole::Member)?,
        declaring_class: declaring_class.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        access::{AccessFlag, AccessFlagSet},
        model::ConstantLiteral,
        signatures::{PrimitiveKind, TypeExpr, WellKnownAlias},
        test::{mixed_model, widget_model},
        Error,
    };

    #[test]
    fn widget_end_to_end() {
        let records = assemble(&widget_model()).unwrap();

        assert_eq!(
            records,
            vec![
                EmissionRecord::ClassHeader(ClassHeader {
                    name: "Widget".to_string(),
                    package: Some("com.example".to_string()),
                    super_name: "java.lang.Object".to_string(),
                    source_file: Some("Widget.java".to_string()),
                    flags: AccessFlagSet::Flags(vec![AccessFlag::Public, AccessFlag::Super]),
                    interfaces: vec![],
                }),
                EmissionRecord::FieldDecl(FieldDecl {
                    name: "x".to_string(),
                    field_type: TypeExpr::Primitive(PrimitiveKind::Int),
                    flags: AccessFlagSet::Flags(vec![AccessFlag::Public, AccessFlag::Final]),
                    constant_value: None,
                }),
                EmissionRecord::MethodSkeleton(MethodSkeleton {
                    index: 0,
                    name: "doIt".to_string(),
                    return_type: TypeExpr::Primitive(PrimitiveKind::Void),
                    arg_types: vec![],
                    arg_names: vec![],
                    flags: AccessFlagSet::Flags(vec![AccessFlag::Public]),
                    declaring_class: "com.example.Widget".to_string(),
                }),
            ]
        );
    }

    #[test]
    fn counts_and_indices() {
        let model = mixed_model();
        let records = assemble(&model).unwrap();

        assert_eq!(records.len(), 1 + model.fields.len() + model.methods.len());
        assert!(matches!(records[0], EmissionRecord::ClassHeader(_)));

        let fields: Vec<_> = records
            .iter()
            .filter_map(|record| match record {
                EmissionRecord::FieldDecl(field) => Some(field),
                _ => None,
            })
            .collect();
        let methods: Vec<_> = records
            .iter()
            .filter_map(|record| match record {
                EmissionRecord::MethodSkeleton(method) => Some(method),
                _ => None,
            })
            .collect();

        assert_eq!(fields.len(), model.fields.len());
        assert_eq!(methods.len(), model.methods.len());
        for (position, method) in methods.iter().enumerate() {
            assert_eq!(method.index, position);
            assert_eq!(method.name, model.methods[position].name);
        }

        // fields precede methods
        let first_method = records
            .iter()
            .position(|record| matches!(record, EmissionRecord::MethodSkeleton(_)))
            .unwrap();
        assert_eq!(first_method, 1 + model.fields.len());
    }

    #[test]
    fn default_package_and_members() {
        let records = assemble(&mixed_model()).unwrap();

        let EmissionRecord::ClassHeader(header) = &records[0] else {
            panic!("header first");
        };
        assert_eq!(header.name, "Mixed");
        assert_eq!(header.package, None);
        assert_eq!(header.qualified_name(), "Mixed");
        assert_eq!(header.interfaces.len(), 2);
        assert_eq!(
            header.flags,
            AccessFlagSet::Flags(vec![
                AccessFlag::Public,
                AccessFlag::Super,
                AccessFlag::Abstract
            ])
        );

        let EmissionRecord::FieldDecl(greeting) = &records[1] else {
            panic!("field expected");
        };
        assert_eq!(
            greeting.field_type,
            TypeExpr::WellKnownAlias(WellKnownAlias::String)
        );
        assert_eq!(
            greeting.constant_value.as_deref(),
            Some(ConstantLiteral::String("hi \"there\"".to_string()).to_string().as_str())
        );

        let EmissionRecord::FieldDecl(owner) = &records[4] else {
            panic!("field expected");
        };
        assert!(owner.flags.is_zero());

        let EmissionRecord::MethodSkeleton(run) = &records[7] else {
            panic!("method expected");
        };
        assert!(run.flags.contains(AccessFlag::Synchronized));
        assert!(!run.flags.contains(AccessFlag::Super));
    }

    #[test]
    fn decode_failure_fails_the_class() {
        let mut model = widget_model();
        model.fields.push(FieldModel::new("broken", "[L", 0x0001));
        assert!(matches!(
            assemble(&model),
            Err(Error::MalformedSignature { .. })
        ));

        let mut model = widget_model();
        model.access_flags = 0x8001;
        assert!(matches!(
            assemble(&model),
            Err(Error::UnknownFlagBit { bit: 15, .. })
        ));
    }
}
