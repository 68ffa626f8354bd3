use crate::{
    file::parser::Parser,
    signatures::{MethodDescriptor, PrimitiveKind, TypeExpr, WellKnownAlias},
    Result,
};

/// Maximum number of array dimensions the JVM allows
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Decoder for class-file type signatures and method descriptors
///
/// # Example
///
/// ```rust
/// use jvmscope::signatures::{SignatureParser, TypeExpr, PrimitiveKind};
///
/// let mut parser = SignatureParser::new("[[I");
/// let expr = parser.parse_signature()?;
/// assert_eq!(
///     expr,
///     TypeExpr::ArrayOf { element: Box::new(TypeExpr::Primitive(PrimitiveKind::Int)), dimensions: 2 }
/// );
/// # Ok::<(), jvmscope::Error>(())
/// ```
///
/// ## Notes:
/// - A parser instance decodes exactly one signature; create a new one per input.
pub struct SignatureParser<'a> {
    parser: Parser<'a>,
    signature: &'a str,
}

impl<'a> SignatureParser<'a> {
    /// Create a new `SignatureParser` over a signature string
    ///
    /// ## Arguments
    /// * 'signature' - The signature text to decode
    #[must_use]
    pub fn new(signature: &'a str) -> Self {
        SignatureParser {
            parser: Parser::new(signature.as_bytes()),
            signature,
        }
    }

    /// Parse a complete field signature, return types (`V`) included
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedSignature`] if the text is not exactly one signature
    pub fn parse_signature(&mut self) -> Result<TypeExpr> {
        if self.parser.is_empty() {
            return Err(signature_error!(self.signature, "empty signature"));
        }

        let expr = self.parse_type(true)?;
        self.expect_end()?;
        Ok(expr)
    }

    /// Parse a complete method descriptor, `(<arguments>)<return>`
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedSignature`] if the text is not a method descriptor
    pub fn parse_method_descriptor(&mut self) -> Result<MethodDescriptor> {
        let (arguments, return_type) = self.parse_descriptor_parts()?;
        Ok(MethodDescriptor {
            arguments: arguments.into_iter().map(|(expr, _)| expr).collect(),
            return_type: return_type.0,
        })
    }

    /// Split a method descriptor into its argument signature strings and return signature
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedSignature`] if the text is not a method descriptor
    pub fn split_method_descriptor(&mut self) -> Result<(Vec<String>, String)> {
        let (arguments, return_type) = self.parse_descriptor_parts()?;
        Ok((
            arguments.into_iter().map(|(_, text)| text.to_string()).collect(),
            return_type.1.to_string(),
        ))
    }

    /// Parses `(<arguments>)<return>` keeping every type together with its source text
    #[allow(clippy::type_complexity)]
    fn parse_descriptor_parts(&mut self) -> Result<(Vec<(TypeExpr, &'a str)>, (TypeExpr, &'a str))> {
        match self.parser.read_be::<u8>() {
            Ok(b'(') => {}
            _ => return Err(signature_error!(self.signature, "expected '(' at offset 0")),
        }

        let mut arguments = Vec::new();
        loop {
            match self.parser.peek_byte() {
                Ok(b')') => {
                    self.parser.advance()?;
                    break;
                }
                Ok(_) => {
                    let start = self.parser.pos();
                    let expr = self.parse_type(false)?;
                    arguments.push((expr, &self.signature[start..self.parser.pos()]));
                }
                Err(_) => {
                    return Err(signature_error!(
                        self.signature,
                        "argument list is missing its ')'"
                    ))
                }
            }
        }

        if !self.parser.has_more_data() {
            return Err(signature_error!(self.signature, "missing return type"));
        }

        let start = self.parser.pos();
        let return_type = self.parse_type(true)?;
        let return_text = &self.signature[start..self.parser.pos()];
        self.expect_end()?;

        Ok((arguments, (return_type, return_text)))
    }

    /// Parse one type: leading array markers, then a primitive code or an object reference
    fn parse_type(&mut self, allow_void: bool) -> Result<TypeExpr> {
        let mut dimensions = 0_usize;
        while self.parser.peek_byte().ok() == Some(b'[') {
            self.parser.advance()?;
            dimensions += 1;
            if dimensions > MAX_ARRAY_DIMENSIONS {
                return Err(signature_error!(
                    self.signature,
                    "more than {} array dimensions",
                    MAX_ARRAY_DIMENSIONS
                ));
            }
        }

        let element = self.parse_component(allow_void && dimensions == 0)?;
        if dimensions == 0 {
            return Ok(element);
        }

        Ok(TypeExpr::ArrayOf {
            element: Box::new(element),
            dimensions: u8::try_from(dimensions)
                .map_err(|_| signature_error!(self.signature, "too many array dimensions"))?,
        })
    }

    /// Parse a primitive code or `L<name>;`
    fn parse_component(&mut self, allow_void: bool) -> Result<TypeExpr> {
        let offset = self.parser.pos();
        let Ok(code) = self.parser.read_be::<u8>() else {
            return Err(signature_error!(
                self.signature,
                "array marker without component type"
            ));
        };

        if let Some(kind) = PrimitiveKind::from_code(code) {
            if kind == PrimitiveKind::Void && !allow_void {
                return Err(signature_error!(
                    self.signature,
                    "'V' is only valid as a return type (offset {})",
                    offset
                ));
            }
            return Ok(TypeExpr::Primitive(kind));
        }

        if code != b'L' {
            return Err(signature_error!(
                self.signature,
                "unknown type code '{}' at offset {}",
                char::from(code),
                offset
            ));
        }

        let Some(raw_name) = self.parser.read_until(b';') else {
            return Err(signature_error!(
                self.signature,
                "object type at offset {} is missing its ';' terminator",
                offset
            ));
        };

        // The signature is a &str and ';' is ASCII, so the slice is valid UTF-8.
        let internal = &self.signature[offset + 1..offset + 1 + raw_name.len()];
        if internal.is_empty() {
            return Err(signature_error!(
                self.signature,
                "empty class name at offset {}",
                offset
            ));
        }
        if internal.contains(['.', ';', '[', '<', '>', '(', ')']) {
            return Err(signature_error!(
                self.signature,
                "invalid character in class name '{}'",
                internal
            ));
        }
        if internal.split('/').any(str::is_empty) {
            return Err(signature_error!(
                self.signature,
                "empty package or class segment in '{}'",
                internal
            ));
        }

        let name = internal.replace('/', ".");
        match WellKnownAlias::from_class_name(&name) {
            Some(alias) => Ok(TypeExpr::WellKnownAlias(alias)),
            None => Ok(TypeExpr::ObjectRef(name)),
        }
    }

    fn expect_end(&self) -> Result<()> {
        if self.parser.has_more_data() {
            return Err(signature_error!(
                self.signature,
                "trailing characters at offset {}",
                self.parser.pos()
            ));
        }
        Ok(())
    }
}
