//! Dataset prefix resolution
//!
//! GAR exports name every file after its dataset followed by version, date
//! and GUID tokens, e.g. `AS_ADDR_OBJ_2_251_01_04_01_01.xsd` or
//! `AS_ADDR_OBJ_20230101_0a1b2c3d-....XML`. The dataset prefix is what
//! remains once everything from the first all-digit token onwards is dropped.
//!
//! Parameter exports (`AS_HOUSES_PARAMS_...`, `AS_STEADS_PARAMS_...`) all
//! share the single `AS_PARAM` schema; [`normalize_alias`] maps them onto it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static DIGIT_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

const PARAMS_SUFFIX: &str = "_PARAMS";
const PARAM_ALIAS: &str = "PARAM";

/// Derive the dataset prefix from a file name or path
///
/// Never fails; a name without any digit token is its own prefix.
pub fn derive_prefix(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());

    let tokens: Vec<&str> = base
        .split('_')
        .take_while(|token| !DIGIT_TOKEN.is_match(token))
        .collect();

    if tokens.is_empty() {
        return base;
    }
    tokens.join("_")
}

/// Alias of a `_PARAMS` prefix: `<first token>_PARAM`
///
/// Returns `None` when the prefix has no alias.
pub fn normalize_alias(prefix: &str) -> Option<String> {
    if !prefix.ends_with(PARAMS_SUFFIX) {
        return None;
    }
    let first = prefix.split('_').next().unwrap_or(prefix);
    Some(format!("{}_{}", first, PARAM_ALIAS))
}

/// Normalized form of a prefix (the alias if there is one, else the prefix)
pub fn normalize(prefix: &str) -> String {
    normalize_alias(prefix).unwrap_or_else(|| prefix.to_string())
}

/// Keys to try, in order, when looking a prefix up in the catalog
pub fn lookup_keys(prefix: &str) -> Vec<String> {
    let mut keys = vec![prefix.to_string()];
    if let Some(alias) = normalize_alias(prefix) {
        if alias != prefix {
            keys.push(alias);
        }
    }
    keys
}
