//! Integration tests exercising the public `dbc_bus` API end to end:
//! parsing, building, serializing, and diffing whole DBC texts.

use dbc_bus::{DatabaseError, LoadError, ParseError};

fn load(text: &str) -> dbc_bus::Bus {
    dbc_bus::load(text).expect("text should load").bus
}

#[test]
fn minimal_valid_file_parses_to_an_empty_bus() {
    let bus = load("VERSION \"\"\nNS_ :\nBS_:\nBU_: \n");
    assert_eq!(bus.version, "");
    assert_eq!(bus.baudrate, None);
    assert_eq!(bus.btr, None);
    assert!(bus.nodes().is_empty());
}

#[test]
fn missing_bs_raises_a_named_database_error() {
    let err = dbc_bus::load("VERSION \"\"\nNS_ :\nBU_: \n").unwrap_err();
    match err {
        LoadError::Database(DatabaseError::MissingSection { section }) => {
            assert_eq!(section, "BS_");
        }
        other => panic!("expected MissingSection(\"BS_\"), got {other:?}"),
    }
}

#[test]
fn message_with_one_multiplexor_nests_both_selected_signals() {
    let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N1 N2\n\
        BO_ 100 Msg: 8 N1\n\
         SG_ Sel M : 0|8@1+ (1,0) [0|3] \"\" N2\n\
         SG_ A m0 : 8|16@1+ (1,0) [0|0] \"\" N2\n\
         SG_ A m2 : 8|16@1+ (1,0) [0|0] \"\" N2\n";
    let bus = load(text);
    let message = bus.message(100).unwrap();
    assert_eq!(message.signals.len(), 1);
    assert_eq!(message.signals[0].name, "Sel");
    let limits: Vec<(f64, f64)> = message.signals[0]
        .switch
        .entries()
        .iter()
        .map(|(r, _)| r.limits())
        .collect();
    assert_eq!(limits, vec![(0.0, 0.0), (2.0, 2.0)]);
}

#[test]
fn duplicate_message_id_names_the_offending_id() {
    let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N1\n\
        BO_ 42 First: 1 N1\n\
        BO_ 42 Second: 1 N1\n";
    let err = dbc_bus::load(text).unwrap_err();
    let LoadError::Database(err) = err else {
        panic!("expected a DatabaseError");
    };
    assert!(err.to_string().contains("42"));
}

#[test]
fn backslash_in_string_is_a_parse_error_at_the_backslash() {
    let text = "VERSION \"a\\b\"\nNS_ :\nBS_:\nBU_: \n";
    let err = dbc_bus::load(text).unwrap_err();
    match err {
        LoadError::Parse(ParseError { line, column, .. }) => {
            assert_eq!((line, column), (1, 11));
        }
        other => panic!("expected a ParseError, got {other:?}"),
    }
}

#[test]
fn diff_of_version_only_change_names_both_values() {
    let a = load("VERSION \"a\"\nNS_ :\nBS_:\nBU_: \n");
    let b = load("VERSION \"b\"\nNS_ :\nBS_:\nBU_: \n");
    assert_eq!(dbc_bus::diff(&a, &b), "version:\n < a\n > b\n");
}

#[test]
fn round_trip_preserves_semantic_equality() {
    let text = "VERSION \"demo\"\n\
        NS_ :\n\
            CM_\n\
            BA_DEF_\n\
        BS_: 500000 : 1,2\n\
        BU_: ECU1 ECU2\n\
        VAL_TABLE_ OnOff 1 \"On\" 0 \"Off\" ;\n\
        BO_ 100 Engine: 8 ECU1\n\
         SG_ Sel M : 0|8@1+ (1,0) [0|3] \"\" ECU2\n\
         SG_ RPM m0 : 8|16@1+ (0.25,0) [0|16000] \"rpm\" ECU2\n\
         SG_ Temp m1 : 8|8@1+ (1,-40) [-40|215] \"degC\" ECU2\n\
        BO_TX_BU_ 100 : ECU2;\n\
        CM_ BO_ 100 \"engine status frame\";\n\
        CM_ SG_ 100 RPM \"engine speed\";\n\
        BA_DEF_ SG_ \"GenSigStartValue\" INT 0 100000;\n\
        BA_DEF_DEF_ \"GenSigStartValue\" 0;\n\
        BA_ \"GenSigStartValue\" SG_ 100 RPM 10;\n\
        VAL_ 100 Sel 0 \"Rpm\" 1 \"Temp\" ;\n\
        SIG_GROUP_ 100 Vitals 1 : RPM Temp;\n";
    let first = load(text);
    let serialized = dbc_bus::to_dbc_text(&first);
    let second = dbc_bus::load(&serialized)
        .expect("serialized text should re-parse")
        .bus;
    assert_eq!(dbc_bus::diff(&first, &second), "");
}

#[test]
fn extended_multiplexing_round_trips() {
    let text = "VERSION \"\"\nNS_ :\nBS_:\nBU_: N2\n\
        BO_ 100 Msg: 8 N2\n\
         SG_ Sel M : 0|8@1+ (1,0) [0|3] \"\" N2\n\
         SG_ A : 8|8@1+ (1,0) [0|0] \"\" N2\n\
        SG_MUL_VAL_ 100 A Sel 0-1,3-3;\n";
    let bus = load(text);
    let serialized = dbc_bus::to_dbc_text(&bus);
    assert!(serialized.contains("SG_MUL_VAL_"));
    let round = dbc_bus::load(&serialized).unwrap().bus;
    assert_eq!(dbc_bus::diff(&bus, &round), "");
}
