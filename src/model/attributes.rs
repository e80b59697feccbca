//! Attribute definitions, defaults, and literal values (`BA_DEF_`, `BA_DEF_DEF_`, `BA_`).

/// Which kind of object an attribute definition (`BA_DEF_`) or value (`BA_`)
/// applies to. `EV_`-scoped comments/attributes are recognized by the grammar
/// but rejected as unsupported by the model builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetKind {
    Global,
    Node,
    Message,
    Signal,
    Event,
}

impl TargetKind {
    /// The `BA_DEF_`/`BA_`/`CM_` spec-object prefix this kind renders as on
    /// emission (empty string for the global/unscoped kind).
    pub(crate) fn dbc_label(self) -> &'static str {
        match self {
            TargetKind::Global => "",
            TargetKind::Node => "BU_",
            TargetKind::Message => "BO_",
            TargetKind::Signal => "SG_",
            TargetKind::Event => "EV_",
        }
    }
}

/// A typed custom property attached to a [`TargetKind`] by `BA_DEF_`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrTypedef {
    Int { min: i64, max: i64 },
    Hex { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    Str,
    Enum(Vec<String>),
}

/// A concrete attribute/default value as stored by `BA_DEF_DEF_` and `BA_`.
///
/// `BA_`'s value grammar tries `double` before `uint`/`sint`, so a bare
/// integer literal such as `500000` is read through the floating-point atom
/// and stored as `Literal::Double`, while `BA_DEF_DEF_` tries `uint`/`sint`
/// first and stores the same text as `Literal::Int`. This asymmetry is
/// preserved rather than normalized away, because normalizing would change
/// which `Literal` variant a round-trip produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Double(f64),
    Str(String),
}

impl Literal {
    pub fn is_string(&self) -> bool {
        matches!(self, Literal::Str(_))
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Double(v) => write!(f, "{v}"),
            Literal::Str(v) => write!(f, "{v}"),
        }
    }
}
