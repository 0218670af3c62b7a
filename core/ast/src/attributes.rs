//! Constraint attributes attached to schema declarations.
//!
//! Every attribute kind decides on its own whether it may decorate a given
//! node. The decision is a single exhaustive `match` in
//! [`Attribute::is_applicable`], so adding a kind forces every rule to be
//! revisited.

use std::fmt::{self, Display, Formatter};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::nodes::{
    EnumDef, GenericType, ImportDef, PackageDef, StructDef, Variable, VariableType,
};

#[derive(Clone, PartialEq, Debug, Serialize)]
pub enum Attribute {
    /// Name under which a package, type or field is emitted in target languages.
    ExportAs(String),
    /// Precision of a `float` field.
    Precision(f64),
    /// Permitted values of a numeric field.
    Range(Range),
    /// Marks a struct, class or enum as a message type.
    Message,
    /// Schema version of a package.
    Version(i64),
}

/// Numeric interval with independently inclusive or exclusive endpoints.
///
/// Fields are private: a `Range` only exists if its bounds are ordered and no
/// infinite endpoint is inclusive.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Range {
    lower_bound: f64,
    upper_bound: f64,
    lower_inclusive: bool,
    upper_inclusive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("lower bound on range is higher than upper bound")]
    InvertedBounds,

    #[error("infinity cannot be inclusive in range")]
    InclusiveInfinity,
}

/// Reason an attribute was rejected for a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("ExportAs attribute is ambiguous between multiple variables")]
    AmbiguousExportAs,

    #[error(
        "ExportAs attribute can only be applied to package, classes, structs, enums or variables"
    )]
    ExportAsMisplaced,

    #[error("Precision attribute can only be applied to float variables")]
    PrecisionNotFloat,

    #[error("Range attribute applied to integer types must be limited by integers")]
    RangeNotIntegral,

    #[error("Range attribute cannot be applied to non-numeric types")]
    RangeNotNumeric,

    #[error("Message attribute is only applicable to classes, structs, and enums")]
    MessageMisplaced,

    #[error("Version attribute can only be applied to package definition")]
    VersionMisplaced,
}

/// The node an attribute is being checked against.
///
/// `MultiVariable` is the shape of a declaration such as `int x, y` before it
/// is split into one [`Variable`] per name.
#[derive(Clone, Copy, Debug)]
pub enum AttributeTarget<'a> {
    Package(&'a PackageDef),
    Import(&'a ImportDef),
    Struct(&'a StructDef),
    Enum(&'a EnumDef),
    Variable(&'a Variable),
    MultiVariable(&'a VariableType),
}

impl Range {
    /// # Errors
    ///
    /// Returns [`RangeError::InvertedBounds`] when `lower_bound > upper_bound` and
    /// [`RangeError::InclusiveInfinity`] when an infinite endpoint is inclusive.
    pub fn new(
        lower_bound: f64,
        lower_inclusive: bool,
        upper_bound: f64,
        upper_inclusive: bool,
    ) -> Result<Self, RangeError> {
        if lower_bound > upper_bound {
            return Err(RangeError::InvertedBounds);
        }
        if (lower_bound.is_infinite() && lower_inclusive)
            || (upper_bound.is_infinite() && upper_inclusive)
        {
            return Err(RangeError::InclusiveInfinity);
        }
        Ok(Self {
            lower_bound,
            upper_bound,
            lower_inclusive,
            upper_inclusive,
        })
    }

    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    #[must_use]
    pub fn lower_inclusive(&self) -> bool {
        self.lower_inclusive
    }

    #[must_use]
    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    /// Unbounded endpoints count as integral.
    #[must_use]
    pub fn has_integral_bounds(&self) -> bool {
        let integral = |bound: f64| bound.is_infinite() || bound.fract() == 0.0;
        integral(self.lower_bound) && integral(self.upper_bound)
    }
}

/// Infinite bounds serialize as the strings `"inf"` and `"-inf"`; JSON has no
/// number for them.
impl Serialize for Range {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Range", 4)?;
        state.serialize_field("lower_bound", &Bound(self.lower_bound))?;
        state.serialize_field("upper_bound", &Bound(self.upper_bound))?;
        state.serialize_field("lower_inclusive", &self.lower_inclusive)?;
        state.serialize_field("upper_inclusive", &self.upper_inclusive)?;
        state.end()
    }
}

struct Bound(f64);

impl Serialize for Bound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.is_infinite() {
            serializer.serialize_str(if self.0 > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let open = if self.lower_inclusive { '[' } else { '<' };
        let close = if self.upper_inclusive { ']' } else { '>' };
        write!(
            f,
            "{open}{}, {}{close}",
            self.lower_bound, self.upper_bound
        )
    }
}

impl Attribute {
    /// Checks whether this attribute may decorate `target`.
    ///
    /// # Errors
    ///
    /// Returns the attribute's own explanation when the target does not
    /// support it.
    pub fn is_applicable(&self, target: AttributeTarget<'_>) -> Result<(), AttributeError> {
        match self {
            Attribute::ExportAs(_) => match target {
                AttributeTarget::Package(_)
                | AttributeTarget::Struct(_)
                | AttributeTarget::Enum(_)
                | AttributeTarget::Variable(_) => Ok(()),
                AttributeTarget::MultiVariable(_) => Err(AttributeError::AmbiguousExportAs),
                AttributeTarget::Import(_) => Err(AttributeError::ExportAsMisplaced),
            },
            Attribute::Precision(_) => match variable_type(target).and_then(VariableType::generic) {
                Some(GenericType::Float) => Ok(()),
                _ => Err(AttributeError::PrecisionNotFloat),
            },
            Attribute::Range(range) => match variable_type(target).and_then(VariableType::generic) {
                Some(generic) if generic.is_floating_point() => Ok(()),
                Some(generic) if generic.is_integer() => {
                    if range.has_integral_bounds() {
                        Ok(())
                    } else {
                        Err(AttributeError::RangeNotIntegral)
                    }
                }
                _ => Err(AttributeError::RangeNotNumeric),
            },
            Attribute::Message => match target {
                AttributeTarget::Struct(_) | AttributeTarget::Enum(_) => Ok(()),
                AttributeTarget::Package(_)
                | AttributeTarget::Import(_)
                | AttributeTarget::Variable(_)
                | AttributeTarget::MultiVariable(_) => Err(AttributeError::MessageMisplaced),
            },
            Attribute::Version(_) => match target {
                AttributeTarget::Package(_) => Ok(()),
                AttributeTarget::Import(_)
                | AttributeTarget::Struct(_)
                | AttributeTarget::Enum(_)
                | AttributeTarget::Variable(_)
                | AttributeTarget::MultiVariable(_) => Err(AttributeError::VersionMisplaced),
            },
        }
    }
}

fn variable_type(target: AttributeTarget<'_>) -> Option<&VariableType> {
    match target {
        AttributeTarget::Variable(variable) => Some(&variable.ty),
        AttributeTarget::MultiVariable(ty) => Some(ty),
        _ => None,
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::ExportAs(name) => write!(f, "ExportAs {name}"),
            Attribute::Precision(precision) => write!(f, "Precision {precision}"),
            Attribute::Range(range) => write!(f, "Range {range}"),
            Attribute::Message => write!(f, "Message"),
            Attribute::Version(version) => write!(f, "Version {version}"),
        }
    }
}
