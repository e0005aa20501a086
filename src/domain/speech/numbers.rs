//! Spelled-out cardinal numbers for the languages we can read aloud.

use super::language::LanguageCode;

const EN_ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];
const EN_TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];
const EN_SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

const ES_UNITS: [&str; 30] = [
    "cero",
    "uno",
    "dos",
    "tres",
    "cuatro",
    "cinco",
    "seis",
    "siete",
    "ocho",
    "nueve",
    "diez",
    "once",
    "doce",
    "trece",
    "catorce",
    "quince",
    "dieciséis",
    "diecisiete",
    "dieciocho",
    "diecinueve",
    "veinte",
    "veintiuno",
    "veintidós",
    "veintitrés",
    "veinticuatro",
    "veinticinco",
    "veintiséis",
    "veintisiete",
    "veintiocho",
    "veintinueve",
];
const ES_TENS: [&str; 10] = [
    "", "", "", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta", "noventa",
];
const ES_HUNDREDS: [&str; 10] = [
    "",
    "ciento",
    "doscientos",
    "trescientos",
    "cuatrocientos",
    "quinientos",
    "seiscientos",
    "setecientos",
    "ochocientos",
    "novecientos",
];
/// Long-scale names: 10^6, 10^12, 10^18
const ES_SCALES: [(&str, &str); 3] = [
    ("millón", "millones"),
    ("billón", "billones"),
    ("trillón", "trillones"),
];

/// Whether `spell` has words for this language
pub fn can_spell(language: LanguageCode) -> bool {
    matches!(language, LanguageCode::English | LanguageCode::Spanish)
}

/// Spell `n` in `language`, or `None` when we have no words for it
pub fn spell(n: u64, language: LanguageCode) -> Option<String> {
    match language {
        LanguageCode::English => Some(spell_en(n)),
        LanguageCode::Spanish => Some(spell_es(n)),
        _ => None,
    }
}

/// Spell a run of ASCII digits. Runs that overflow `u64` are read digit by digit.
pub fn spell_digits(digits: &str, language: LanguageCode) -> Option<String> {
    if !can_spell(language) {
        return None;
    }

    match digits.parse::<u64>() {
        Ok(n) => spell(n, language),
        Err(_) => {
            let words: Option<Vec<String>> = digits
                .chars()
                .map(|c| c.to_digit(10).and_then(|d| spell(d as u64, language)))
                .collect();
            words.map(|w| w.join(" "))
        }
    }
}

fn spell_en(n: u64) -> String {
    if n == 0 {
        return EN_ONES[0].to_string();
    }

    let mut groups = Vec::new();
    let mut remaining = n;
    while remaining > 0 {
        groups.push((remaining % 1000) as usize);
        remaining /= 1000;
    }

    let mut parts = Vec::new();
    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        // "one thousand and five": the trailing group joins with "and" when it has no hundreds
        if scale == 0 && group < 100 && !parts.is_empty() {
            parts.push("and".to_string());
        }
        parts.push(spell_en_group(group));
        if scale > 0 {
            parts.push(EN_SCALES[scale].to_string());
        }
    }

    parts.join(" ")
}

fn spell_en_group(n: usize) -> String {
    let hundreds = n / 100;
    let rest = n % 100;

    let mut words = Vec::new();
    if hundreds > 0 {
        words.push(format!("{} hundred", EN_ONES[hundreds]));
        if rest > 0 {
            words.push("and".to_string());
        }
    }
    if rest > 0 {
        words.push(spell_en_below_hundred(rest));
    }
    words.join(" ")
}

fn spell_en_below_hundred(n: usize) -> String {
    if n < 20 {
        return EN_ONES[n].to_string();
    }
    let tens = EN_TENS[n / 10];
    match n % 10 {
        0 => tens.to_string(),
        ones => format!("{}-{}", tens, EN_ONES[ones]),
    }
}

fn spell_es(n: u64) -> String {
    if n == 0 {
        return ES_UNITS[0].to_string();
    }

    // Split into blocks of 10^6 (long scale)
    let mut blocks = Vec::new();
    let mut remaining = n;
    while remaining > 0 {
        blocks.push(remaining % 1_000_000);
        remaining /= 1_000_000;
    }

    let mut parts = Vec::new();
    for (scale, &block) in blocks.iter().enumerate().rev() {
        if block == 0 {
            continue;
        }
        if scale == 0 {
            parts.push(spell_es_below_million(block, false));
        } else {
            let (singular, plural) = ES_SCALES[scale - 1];
            if block == 1 {
                parts.push(format!("un {}", singular));
            } else {
                parts.push(format!("{} {}", spell_es_below_million(block, true), plural));
            }
        }
    }

    parts.join(" ")
}

/// `apocope` shortens a trailing "uno" when the number modifies a noun ("veintiún millones")
fn spell_es_below_million(n: u64, apocope: bool) -> String {
    let thousands = (n / 1000) as usize;
    let rest = (n % 1000) as usize;

    let mut words = Vec::new();
    match thousands {
        0 => {}
        1 => words.push("mil".to_string()),
        t => words.push(format!("{} mil", spell_es_below_thousand(t, true))),
    }
    if rest > 0 {
        words.push(spell_es_below_thousand(rest, apocope));
    }
    words.join(" ")
}

fn spell_es_below_thousand(n: usize, apocope: bool) -> String {
    if n == 100 {
        return "cien".to_string();
    }

    let hundreds = n / 100;
    let rest = n % 100;

    let mut words = Vec::new();
    if hundreds > 0 {
        words.push(ES_HUNDREDS[hundreds].to_string());
    }
    if rest > 0 {
        words.push(spell_es_below_hundred(rest, apocope));
    }
    words.join(" ")
}

fn spell_es_below_hundred(n: usize, apocope: bool) -> String {
    let word = if n < 30 {
        ES_UNITS[n].to_string()
    } else {
        match n % 10 {
            0 => ES_TENS[n / 10].to_string(),
            ones => format!("{} y {}", ES_TENS[n / 10], ES_UNITS[ones]),
        }
    };

    if !apocope {
        return word;
    }
    if word == "veintiuno" {
        "veintiún".to_string()
    } else if let Some(stem) = word.strip_suffix("uno") {
        format!("{}un", stem)
    } else {
        word
    }
}
