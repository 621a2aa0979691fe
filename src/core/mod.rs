mod table;
mod validator;

pub use table::{Dfa, DFA, STATE_COUNT, UTF8_ACCEPT, UTF8_REJECT};
pub use validator::{Utf8Validator, Status, validate_whole, validate_complete};
