//! Reserved-word sets and the section-keyword dispatch order.

/// Every reserved word the grammar recognizes (including the two
/// dummy-message-name keywords `VECTOR__INDEPENDENT_SIG_MSG` and
/// `Vector__XXX`, which are identifiers in their own right, never a
/// section keyword).
pub const ALL: &[&str] = &[
    "VERSION",
    "NS_",
    "NS_DESC_",
    "CM_",
    "BA_DEF_",
    "BA_",
    "VAL_",
    "CAT_DEF_",
    "CAT_",
    "FILTER",
    "BA_DEF_DEF_",
    "EV_DATA_",
    "ENVVAR_DATA_",
    "SGTYPE_",
    "SGTYPE_VAL_",
    "BA_DEF_SGTYPE_",
    "BA_SGTYPE_",
    "SIG_TYPE_REF_",
    "VAL_TABLE_",
    "SIG_GROUP_",
    "SIG_VALTYPE_",
    "SIGTYPE_VALTYPE_",
    "BO_TX_BU_",
    "BA_DEF_REL_",
    "BA_REL_",
    "BA_DEF_DEF_REL_",
    "BU_SG_REL_",
    "BU_EV_REL_",
    "BU_BO_REL_",
    "SG_MUL_VAL_",
    "BS_",
    "BU_",
    "BO_",
    "SG_",
    "EV_",
    "VECTOR__INDEPENDENT_SIG_MSG",
    "Vector__XXX",
];

/// Reserved set used almost everywhere an identifier is read: every keyword
/// except the dummy multiplexed-message name `VECTOR__INDEPENDENT_SIG_MSG`,
/// so that name remains usable as an ordinary message name.
pub const MOST: &[&str] = &[
    "VERSION",
    "NS_",
    "NS_DESC_",
    "CM_",
    "BA_DEF_",
    "BA_",
    "VAL_",
    "CAT_DEF_",
    "CAT_",
    "FILTER",
    "BA_DEF_DEF_",
    "EV_DATA_",
    "ENVVAR_DATA_",
    "SGTYPE_",
    "SGTYPE_VAL_",
    "BA_DEF_SGTYPE_",
    "BA_SGTYPE_",
    "SIG_TYPE_REF_",
    "VAL_TABLE_",
    "SIG_GROUP_",
    "SIG_VALTYPE_",
    "SIGTYPE_VALTYPE_",
    "BO_TX_BU_",
    "BA_DEF_REL_",
    "BA_REL_",
    "BA_DEF_DEF_REL_",
    "BU_SG_REL_",
    "BU_EV_REL_",
    "BU_BO_REL_",
    "SG_MUL_VAL_",
    "BS_",
    "BU_",
    "BO_",
    "SG_",
    "EV_",
    "VECTOR__INDEPENDENT_SIG_MSG",
];

/// Reserved set used for a message's own name: every keyword except
/// `Vector__XXX` (the dummy node name), so `VECTOR__INDEPENDENT_SIG_MSG`
/// stays reserved here — a message is never allowed to be named that.
pub const BO: &[&str] = &[
    "VERSION",
    "NS_",
    "NS_DESC_",
    "CM_",
    "BA_DEF_",
    "BA_",
    "VAL_",
    "CAT_DEF_",
    "CAT_",
    "FILTER",
    "BA_DEF_DEF_",
    "EV_DATA_",
    "ENVVAR_DATA_",
    "SGTYPE_",
    "SGTYPE_VAL_",
    "BA_DEF_SGTYPE_",
    "BA_SGTYPE_",
    "SIG_TYPE_REF_",
    "VAL_TABLE_",
    "SIG_GROUP_",
    "SIG_VALTYPE_",
    "SIGTYPE_VALTYPE_",
    "BO_TX_BU_",
    "BA_DEF_REL_",
    "BA_REL_",
    "BA_DEF_DEF_REL_",
    "BU_SG_REL_",
    "BU_EV_REL_",
    "BU_BO_REL_",
    "SG_MUL_VAL_",
    "BS_",
    "BU_",
    "BO_",
    "SG_",
    "EV_",
    "Vector__XXX",
];

/// Section keywords in longest-match dispatch order: earlier entries that
/// are prefixes of later ones are listed after them (`BA_DEF_DEF_` before
/// `BA_DEF_` before `BA_`), so a plain left-to-right prefix scan finds the
/// longest match first.
pub const SECTION_ORDER: &[&str] = &[
    "BA_DEF_DEF_",
    "BA_DEF_",
    "BA_",
    "BO_TX_BU_",
    "BO_",
    "BS_",
    "BU_",
    "CM_",
    "ENVVAR_DATA_",
    "EV_",
    "NS_",
    "SIG_GROUP_",
    "SIG_TYPE_REF_",
    "SIG_VALTYPE_",
    "SGTYPE_",
    "SG_MUL_VAL_",
    "VAL_TABLE_",
    "VAL_",
    "VERSION",
];

/// Keywords `NS_`'s body recognizes as extension symbols, distinct from (and
/// slightly narrower than) the fixed set the serializer always emits.
pub const NS_SYMBOLS: &[&str] = &[
    "BA_DEF_DEF_REL_",
    "BA_DEF_DEF_",
    "BA_DEF_SGTYPE_",
    "BA_DEF_REL_",
    "BA_DEF_",
    "BA_REL_",
    "BA_SGTYPE_",
    "BA_",
    "BO_TX_BU_",
    "BU_SG_REL_",
    "BU_EV_REL_",
    "BU_BO_REL_",
    "CM_",
    "CAT_DEF_",
    "CAT_",
    "ENVVAR_DATA_",
    "EV_DATA_",
    "FILTER",
    "NS_DESC_",
    "SIG_GROUP_",
    "SIG_TYPE_REF_",
    "SIG_VALTYPE_",
    "SIGTYPE_VALTYPE_",
    "SGTYPE_VAL_",
    "SGTYPE_",
    "SG_MUL_VAL_",
    "VAL_TABLE_",
    "VAL_",
];
