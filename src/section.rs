//! Tagged section values and the ordered store the model builder consumes.

use crate::model::attributes::{AttrTypedef, Literal, TargetKind};

/// A signal as produced by the `SG_` grammar rule, before the builder turns
/// it into a [`crate::model::signal::Signal`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawSignal {
    pub name: String,
    pub multiplex_value: Option<u32>,
    pub is_multiplexor: bool,
    pub start_bit: u32,
    pub numbits: u32,
    pub is_little_endian: bool,
    pub is_signed: bool,
    pub factor: f64,
    pub offset: f64,
    pub range: (f64, f64),
    pub unit: String,
    pub receivers: Vec<String>,
}

/// The object a `CM_`/`BA_` statement targets.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentRef {
    Global,
    Node(String),
    Message(u32),
    Signal(u32, String),
    Event(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    pub id: u32,
    pub name: String,
    pub size: u32,
    pub transmitter: String,
    pub signals: Vec<RawSignal>,
}

/// One recognized top-level statement, tagged by kind.
///
/// `ENVVAR_DATA_`, `EV_`, `SIG_TYPE_REF_`, and `SGTYPE_` are recognized
/// keywords with no body rule: the grammar raises a `ParseError` naming the
/// keyword the moment one is encountered, so no variant holds their payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Version(String),
    Ns(Vec<String>),
    Bs(Option<(u32, u32, u32)>),
    Bu(Vec<String>),
    ValTable {
        name: String,
        entries: Vec<(i64, String)>,
    },
    Bo(RawMessage),
    BoTxBu {
        id: u32,
        transmitters: Vec<String>,
    },
    Cm {
        target: ComponentRef,
        text: String,
    },
    BaDef {
        target: TargetKind,
        name: String,
        typedef: AttrTypedef,
    },
    BaDefDef {
        name: String,
        value: Literal,
    },
    Ba {
        name: String,
        target: ComponentRef,
        value: Literal,
    },
    Val {
        id: u32,
        signal: String,
        entries: Vec<(i64, String)>,
    },
    SigGroup {
        id: u32,
        name: String,
        repetition_count: u32,
        signals: Vec<String>,
    },
    SigValtype {
        id: u32,
        signal: String,
        code: u8,
    },
    SgMulVal {
        id: u32,
        signal: String,
        muxor: String,
        ranges: Vec<(u32, u32)>,
    },
}

impl Section {
    /// Keyword this section was parsed from, for residual-section diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Section::Version(_) => "VERSION",
            Section::Ns(_) => "NS_",
            Section::Bs(_) => "BS_",
            Section::Bu(_) => "BU_",
            Section::ValTable { .. } => "VAL_TABLE_",
            Section::Bo(_) => "BO_",
            Section::BoTxBu { .. } => "BO_TX_BU_",
            Section::Cm { .. } => "CM_",
            Section::BaDef { .. } => "BA_DEF_",
            Section::BaDefDef { .. } => "BA_DEF_DEF_",
            Section::Ba { .. } => "BA_",
            Section::Val { .. } => "VAL_",
            Section::SigGroup { .. } => "SIG_GROUP_",
            Section::SigValtype { .. } => "SIG_VALTYPE_",
            Section::SgMulVal { .. } => "SG_MUL_VAL_",
        }
    }
}

/// An ordered sequence of parsed sections, with extraction by kind.
///
/// [`SectionStore::extract`] removes every section the matcher accepts,
/// preserving both the matched and the remaining sections' relative input
/// order. After the model builder has run every step, the store must be
/// empty: anything left over is a structural bug, not a semantic one.
#[derive(Debug, Default)]
pub struct SectionStore {
    sections: Vec<Section>,
}

impl SectionStore {
    pub fn new(sections: Vec<Section>) -> Self {
        SectionStore { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Kind names of whatever sections remain, in order, for a residual-
    /// sections diagnostic.
    pub fn remaining_kinds(&self) -> Vec<&'static str> {
        self.sections.iter().map(Section::kind_name).collect()
    }

    /// Removes and returns, in original relative order, every section for
    /// which `matcher` returns `Ok`; sections it rejects (`Err`, handing the
    /// section back) stay in the store in their original relative order.
    pub fn extract<T>(&mut self, matcher: impl Fn(Section) -> Result<T, Section>) -> Vec<T> {
        let mut matched = Vec::new();
        let mut rest = Vec::new();
        for section in self.sections.drain(..) {
            match matcher(section) {
                Ok(v) => matched.push(v),
                Err(s) => rest.push(s),
            }
        }
        self.sections = rest;
        matched
    }
}
