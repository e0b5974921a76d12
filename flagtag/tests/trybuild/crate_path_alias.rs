//! Trybuild fixture verifying `#[tagged(crate = "...")]` with a renamed
//! dependency.

use flagtag as my_flags;
use my_flags::Tagged;

#[derive(Default, Tagged)]
#[tagged(crate = "my_flags", name = "aliased")]
struct AliasedOptions {
    #[tag(r#"long:"name" default:"foo""#)]
    name: String,
}

fn main() {
    let mut options = AliasedOptions::default();
    let result: my_flags::FlagTagResult<()> = my_flags::parse_from(&mut options, ["--name", "bar"]);
    assert!(result.is_ok());
    assert_eq!(options.name, "bar");
    assert_eq!(<AliasedOptions as Tagged>::command_name(), "aliased");
}
