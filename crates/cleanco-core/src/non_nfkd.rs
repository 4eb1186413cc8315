use phf::phf_map;

/// Lowercase characters that NFKD leaves intact but that should fold to a
/// plain Latin spelling (letters with strokes, ligatures, dotless i).
///
/// Keys are lowercase because folding lowercases before decomposition.
pub static NON_NFKD_MAP: phf::Map<char, &'static str> = phf_map! {
    'ł' => "l",
    'đ' => "d",
    'ø' => "o",
    'ß' => "ss",
    'æ' => "ae",
    'œ' => "oe",
    'þ' => "th",
    'ð' => "d",
    'ħ' => "h",
    'ı' => "i",
    'ŀ' => "l",
    'ŧ' => "t",
    'ŋ' => "n",
    'ĸ' => "k",
    'ſ' => "s",
    'ĳ' => "ij",
    'ƒ' => "f",
    'ɨ' => "i",
    'ƀ' => "b",
    'ƶ' => "z",
};

/// Look up the replacement for a character, if it has one.
pub fn replacement(c: char) -> Option<&'static str> {
    NON_NFKD_MAP.get(&c).copied()
}
