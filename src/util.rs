use crate::op::Function;
use hashbrown::HashMap;

lazy_static! {
    /// Functions callable from a formula, by name.
    pub static ref FUNCTIONS: HashMap<&'static str, Function> = {
        let mut map = HashMap::new();
        for &function in &Function::ALL {
            map.insert(function.name(), function);
        }
        map.shrink_to_fit();
        map
    };
}

/// Check if `c` can appear in a function or variable name
pub fn is_name_part(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Check if `c` is skipped between tokens
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}
