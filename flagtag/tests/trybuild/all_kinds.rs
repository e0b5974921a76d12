//! Trybuild fixture binding one field of every supported type.

use std::collections::HashMap;

use flagtag::Tagged;

#[derive(Default, Tagged)]
struct AllKinds {
    #[tag(r#"long:"flag""#)]
    flag: bool,
    #[tag(r#"long:"ratio""#)]
    ratio: f64,
    #[tag(r#"long:"small""#)]
    small: i32,
    #[tag(r#"long:"large""#)]
    large: i64,
    #[tag(r#"long:"text""#)]
    text: String,
    #[tag(r#"long:"count""#)]
    count: u32,
    #[tag(r#"long:"total""#)]
    total: u64,
    #[tag(r#"positional:"true""#)]
    rest: Vec<String>,
    #[tag(r#"long:"type""#)]
    r#type: String,
    untagged: HashMap<String, Vec<u8>>,
}

fn main() {
    let mut config = AllKinds::default();
    assert_eq!(<AllKinds as Tagged>::command_name(), "all-kinds");
    assert_eq!(config.fields().len(), 9);
    let result = flagtag::parse_from(&mut config, ["--type", "duck", "--total", "9", "rest"]);
    assert!(result.is_ok());
    assert_eq!(config.r#type, "duck");
    assert_eq!(config.total, 9);
    assert_eq!(config.rest, ["rest"]);
    assert!(config.untagged.is_empty());
}
