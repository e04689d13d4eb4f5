use std::fmt;
use std::fmt::Formatter;

#[derive(Debug)]
pub struct LoadError(pub String);
impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "LoadError: {}", self.0)
    }
}
impl From<&str> for LoadError {
    fn from(e: &str) -> Self { LoadError(e.to_string()) }
}
impl From<String> for LoadError {
    fn from(e: String) -> Self { LoadError(e) }
}
impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self { LoadError(e.to_string()) }
}
impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self { LoadError(e.to_string()) }
}
