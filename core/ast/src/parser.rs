//! Recursive-descent parser producing one [`PackageDef`] per source.
//!
//! ```text
//! package   := attributes "package" STRING (import | element)*
//! import    := attributes "use" STRING
//! element   := attributes ("class" | "struct") NAME (":" IDENT)? "{" field* "}"
//!            | attributes "enum" NAME "{" (NAME ("," NAME)* ","?)? "}"
//! field     := attributes type NAME ("," NAME)*
//! type      := (IDENT) ("[" INTEGER? "]")*
//! attributes:= ("@" entry | "@" "{" entry ("," entry)* ","? "}")*
//! entry     := KEY (":" value)?
//! ```
//!
//! Constant expressions inside attribute values follow the usual arithmetic
//! precedence with `^` binding tightest and associating to the right.

use crate::attributes::Attribute;
use crate::builder::{
    add_element_to_package_body, add_import_to_package_body, add_multi_variable_to_struct_body,
    add_to_enum_body, new_array_of_type, new_enum_def, new_export_as, new_generic_type,
    new_import, new_message, new_named_type, new_package_def, new_precision, new_range,
    new_struct_def, new_version, to_f64, to_i64, unquote,
};
use crate::errors::AstError;
use crate::expr::{BinaryOp, Expr};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::nodes::{PackageDef, StructBody, TypeDefinition, VariableType};

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    #[must_use]
    pub fn new(source: &str, source_name: &str) -> Self {
        Self {
            tokens: Lexer::new(source, source_name).tokenize(),
            position: 0,
        }
    }

    /// Parses a complete schema source.
    ///
    /// # Errors
    ///
    /// Returns the first lexical, syntactic or construction error.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_package(mut self) -> Result<PackageDef, AstError> {
        let attributes = self.parse_attributes()?;
        let keyword = self.expect(TokenKind::Package, "`package`")?;
        let name = self.expect_string("package name string")?;
        let mut package = new_package_def(name, attributes, keyword.location);

        while !self.peek().is(TokenKind::Eof) {
            let attributes = self.parse_attributes()?;
            match self.peek().kind {
                TokenKind::Use => {
                    let keyword = self.advance();
                    let imported = self.expect_string("imported package name string")?;
                    add_import_to_package_body(
                        &mut package,
                        new_import(imported, attributes, keyword.location),
                    );
                }
                TokenKind::Class | TokenKind::Struct => {
                    let element = self.parse_struct(attributes)?;
                    add_element_to_package_body(&mut package, element);
                }
                TokenKind::Enum => {
                    let element = self.parse_enum(attributes)?;
                    add_element_to_package_body(&mut package, element);
                }
                _ => return Err(self.unexpected("`use`, `class`, `struct` or `enum`")),
            }
        }
        Ok(package)
    }

    pub(crate) fn parse_standalone_expression(mut self) -> Result<f64, AstError> {
        let value = self.parse_constant()?;
        self.expect(TokenKind::Eof, "end of expression")?;
        Ok(value)
    }

    fn parse_struct(&mut self, attributes: Vec<Attribute>) -> Result<TypeDefinition, AstError> {
        let keyword = self.advance();
        let is_class = keyword.is(TokenKind::Class);
        let name = self.expect_simple_name("type name")?;
        let overrides = if self.eat(TokenKind::Colon) {
            Some(self.expect(TokenKind::Identifier, "parent type name")?.literal)
        } else {
            None
        };
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut body = StructBody::default();
        while !self.eat(TokenKind::RBrace) {
            self.parse_field(&mut body)?;
        }
        Ok(new_struct_def(
            name,
            is_class,
            overrides,
            body,
            attributes,
            keyword.location,
        ))
    }

    fn parse_field(&mut self, body: &mut StructBody) -> Result<(), AstError> {
        let attributes = self.parse_attributes()?;
        let location = self.peek().location.clone();
        let ty = self.parse_type()?;
        let mut names = Vec::new();
        loop {
            let location = self.peek().location.clone();
            names.push((self.expect_simple_name("field name")?, location));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        add_multi_variable_to_struct_body(body, &ty, names, &attributes, &location)
    }

    fn parse_type(&mut self) -> Result<VariableType, AstError> {
        let name = self.expect(TokenKind::Identifier, "type")?;
        let mut ty =
            new_generic_type(&name.literal).unwrap_or_else(|| new_named_type(name.literal));
        while self.eat(TokenKind::LBracket) {
            let size = if self.peek().is(TokenKind::Integer) {
                let token = self.advance();
                let size = to_i64(&token.literal, &token.location)?;
                Some(u64::try_from(size).map_err(|_| AstError::InvalidNumber {
                    literal: token.literal,
                    location: token.location,
                })?)
            } else {
                None
            };
            self.expect(TokenKind::RBracket, "`]`")?;
            ty = new_array_of_type(ty, size);
        }
        Ok(ty)
    }

    fn parse_enum(&mut self, attributes: Vec<Attribute>) -> Result<TypeDefinition, AstError> {
        let keyword = self.advance();
        let name = self.expect_simple_name("enum name")?;
        let mut def = new_enum_def(name, attributes, keyword.location);
        self.expect(TokenKind::LBrace, "`{`")?;
        while !self.eat(TokenKind::RBrace) {
            let location = self.peek().location.clone();
            let enumeral = self.expect_simple_name("enumeral name")?;
            add_to_enum_body(&mut def, enumeral, location);
            if !self.eat(TokenKind::Comma) {
                self.expect(TokenKind::RBrace, "`,` or `}`")?;
                break;
            }
        }
        Ok(TypeDefinition::Enum(def))
    }

    fn parse_attributes(&mut self) -> Result<Vec<Attribute>, AstError> {
        let mut attributes = Vec::new();
        while self.eat(TokenKind::At) {
            if self.eat(TokenKind::LBrace) {
                while !self.eat(TokenKind::RBrace) {
                    attributes.push(self.parse_attribute_entry()?);
                    if !self.eat(TokenKind::Comma) {
                        self.expect(TokenKind::RBrace, "`,` or `}`")?;
                        break;
                    }
                }
            } else {
                attributes.push(self.parse_attribute_entry()?);
            }
        }
        Ok(attributes)
    }

    fn parse_attribute_entry(&mut self) -> Result<Attribute, AstError> {
        let key = self.expect(TokenKind::Identifier, "attribute name")?;
        match key.literal.as_str() {
            "message" => Ok(new_message()),
            "export_as" | "exportAs" => {
                self.expect(TokenKind::Colon, "`:`")?;
                Ok(new_export_as(self.expect_string("exported name string")?))
            }
            "precision" => {
                self.expect(TokenKind::Colon, "`:`")?;
                let location = self.peek().location.clone();
                new_precision(self.parse_constant()?, &location)
            }
            "range" => {
                self.expect(TokenKind::Colon, "`:`")?;
                self.parse_range()
            }
            "version" => {
                self.expect(TokenKind::Colon, "`:`")?;
                let token = self.expect(TokenKind::Integer, "version number")?;
                Ok(new_version(to_i64(&token.literal, &token.location)?))
            }
            _ => Err(AstError::UnknownAttribute {
                key: key.literal,
                location: key.location,
            }),
        }
    }

    fn parse_range(&mut self) -> Result<Attribute, AstError> {
        let open = self.advance();
        let lower_inclusive = match open.kind {
            TokenKind::LBracket => true,
            TokenKind::LAngle => false,
            _ => return Err(unexpected_token(&open, "`[` or `<`")),
        };
        let lower = self.parse_constant()?;
        self.expect(TokenKind::Comma, "`,`")?;
        let upper = self.parse_constant()?;
        let close = self.advance();
        let upper_inclusive = match close.kind {
            TokenKind::RBracket => true,
            TokenKind::RAngle => false,
            _ => return Err(unexpected_token(&close, "`]` or `>`")),
        };
        new_range(lower, lower_inclusive, upper, upper_inclusive, &open.location)
    }

    fn parse_constant(&mut self) -> Result<f64, AstError> {
        let location = self.peek().location.clone();
        let value = self.parse_sum()?.eval();
        if value.is_nan() {
            return Err(AstError::NotANumber { location });
        }
        Ok(value)
    }

    fn parse_sum(&mut self) -> Result<Expr, AstError> {
        let mut lhs = self.parse_product()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            lhs = Expr::binary(op, lhs, self.parse_product()?);
        }
    }

    fn parse_product(&mut self) -> Result<Expr, AstError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.advance();
            lhs = Expr::binary(op, lhs, self.parse_unary()?);
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, AstError> {
        if self.eat(TokenKind::Minus) {
            return Ok(Expr::Neg(Box::new(self.parse_unary()?)));
        }
        let base = self.parse_atom()?;
        if self.eat(TokenKind::Caret) {
            return Ok(Expr::binary(BinaryOp::Pow, base, self.parse_unary()?));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr, AstError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Integer | TokenKind::Float => {
                Ok(Expr::Number(to_f64(&token.literal, &token.location)?))
            }
            TokenKind::Identifier if token.literal == "inf" => Ok(Expr::Number(f64::INFINITY)),
            TokenKind::Identifier if token.literal == "sqrt" => {
                self.expect(TokenKind::LParen, "`(`")?;
                let inner = self.parse_sum()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(Expr::Sqrt(Box::new(inner)))
            }
            TokenKind::LParen => {
                let inner = self.parse_sum()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            _ => Err(unexpected_token(&token, "number")),
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Consumes the current token. The trailing `Eof` is never consumed.
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if !token.is(TokenKind::Eof) {
            self.position += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().is(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, AstError> {
        if self.peek().is(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_string(&mut self, expected: &'static str) -> Result<String, AstError> {
        let token = self.expect(TokenKind::String, expected)?;
        unquote(&token.literal, &token.location)
    }

    /// An identifier without `.` separators.
    fn expect_simple_name(&mut self, expected: &'static str) -> Result<String, AstError> {
        let token = self.peek();
        if token.is(TokenKind::Identifier) && !token.literal.contains('.') {
            Ok(self.advance().literal)
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> AstError {
        unexpected_token(self.peek(), expected)
    }
}

fn unexpected_token(token: &Token, expected: &'static str) -> AstError {
    match token.kind {
        TokenKind::Invalid => AstError::InvalidToken {
            literal: token.literal.clone(),
            location: token.location.clone(),
        },
        TokenKind::Eof => AstError::UnexpectedToken {
            expected,
            found: "end of input".to_string(),
            location: token.location.clone(),
        },
        _ => AstError::UnexpectedToken {
            expected,
            found: token.literal.clone(),
            location: token.location.clone(),
        },
    }
}

/// Parses `source` as a standalone schema file.
///
/// # Errors
///
/// See [`Parser::parse_package`].
pub fn parse(source: &str, source_name: &str) -> Result<PackageDef, AstError> {
    Parser::new(source, source_name).parse_package()
}
