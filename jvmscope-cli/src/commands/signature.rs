use serde::Serialize;

use jvmscope::{
    emitter::{render_argument_types, render_type},
    signatures::{decode_method_descriptor, decode_signature},
};

use crate::{
    app::GlobalOptions,
    output::{print_labeled, print_output},
};

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum DecodedSignature {
    Field {
        signature: String,
        java: String,
        bcel: String,
    },
    Method {
        signature: String,
        java: String,
        return_type: String,
        arguments: Vec<String>,
        bcel_return: String,
        bcel_arguments: String,
    },
}

pub fn run(signature: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let decoded = if signature.starts_with('(') {
        let descriptor = decode_method_descriptor(signature)?;
        DecodedSignature::Method {
            signature: signature.to_string(),
            java: descriptor.to_string(),
            return_type: descriptor.return_type.to_string(),
            arguments: descriptor.arguments.iter().map(ToString::to_string).collect(),
            bcel_return: render_type(&descriptor.return_type),
            bcel_arguments: render_argument_types(&descriptor.arguments),
        }
    } else {
        let expr = decode_signature(signature)?;
        DecodedSignature::Field {
            signature: signature.to_string(),
            java: expr.to_string(),
            bcel: render_type(&expr),
        }
    };

    print_output(&decoded, opts, |decoded| match decoded {
        DecodedSignature::Field {
            signature,
            java,
            bcel,
        } => print_labeled(&[
            ("Signature", signature.clone()),
            ("Java", java.clone()),
            ("BCEL", bcel.clone()),
        ]),
        DecodedSignature::Method {
            signature,
            java,
            bcel_return,
            bcel_arguments,
            ..
        } => print_labeled(&[
            ("Descriptor", signature.clone()),
            ("Java", java.clone()),
            ("BCEL return", bcel_return.clone()),
            ("BCEL arguments", bcel_arguments.clone()),
        ]),
    })
}
