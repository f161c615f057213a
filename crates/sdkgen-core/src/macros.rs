//! Documentation macro expansion
//!
//! Headers reference shared help strings by macro name instead of a quoted
//! literal. Only exact matches are expanded.

use std::borrow::Cow;

// Trailing spaces are part of the help text.
const BX_MST_OFFERING_CURVE: &str = concat!(
    "The token offering model by block height. \n",
    "    TYPE=1 - fixed quantity model; TYPE=2 - specify parameters; \n",
    "    LQ - Locked Quantity each period; \n",
    "    LP - Locked Period, numeber of how many blocks; \n",
    "    UN - Unlock Number, number of how many LPs; \n",
    "    eg: \n",
    "        TYPE=1;LQ=9000;LP=60000;UN=3  \n",
    "        TYPE=2;LQ=9000;LP=60000;UN=3;UC=20000,20000,20000;UQ=3000,3000,3000 \n",
    "    defaults to disable.",
);

const MACROS: &[(&str, &str)] = &[
    ("BX_ACCOUNT_NAME", "Account name required."),
    ("BX_ACCOUNT_AUTH", "Account password(authorization) required."),
    ("BX_MST_OFFERING_CURVE", BX_MST_OFFERING_CURVE),
    (
        "BX_ADMIN_NAME",
        "Administrator required.(when administrator_required in mvs.conf is set true)",
    ),
    ("BX_ADMIN_AUTH", "Administrator password required."),
];

/// Look up the expansion of a macro token
#[must_use]
pub fn lookup(token: &str) -> Option<&'static str> {
    MACROS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, text)| *text)
}

/// Expand `text` if it is exactly a macro token, otherwise return it unchanged
#[must_use]
pub fn expand(text: &str) -> Cow<'_, str> {
    lookup(text).map_or(Cow::Borrowed(text), Cow::Borrowed)
}
