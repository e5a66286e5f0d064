// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! row {
    // Owned table row from anything `ToString`.
    ($($cell:expr),* $(,)?) => {
        ::std::vec![$( ::std::string::ToString::to_string(&$cell) ),*]
    };
}
