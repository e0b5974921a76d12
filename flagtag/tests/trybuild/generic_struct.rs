//! Trybuild fixture deriving `Tagged` for a struct with generics.

use std::fmt::Debug;
use std::marker::PhantomData;

use flagtag::Tagged;

#[derive(Tagged)]
struct Wrapped<'a, T>
where
    T: Debug,
{
    #[tag(r#"short:"v""#)]
    verbose: bool,
    extra: &'a T,
    marker: PhantomData<T>,
}

fn main() {
    let extra = 5_u8;
    let mut options = Wrapped {
        verbose: false,
        extra: &extra,
        marker: PhantomData,
    };
    assert!(flagtag::parse_from(&mut options, ["-v"]).is_ok());
    assert!(options.verbose);
    assert_eq!(*options.extra, 5);
    let _ = options.marker;
}
