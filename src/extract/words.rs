// src/extract/words.rs

//! English number words, as used for rendering birth years in prose.

static ONES: [&str; 10] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

static TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

/// Index 0 and 1 are never read; teens are their own table.
static TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Words for `n < 100`.
fn two_digits(n: u32) -> String {
    match n {
        0..=9 => ONES[n as usize].to_string(),
        10..=19 => TEENS[(n - 10) as usize].to_string(),
        _ => {
            let ones = n % 10;
            let ones_word = if ones == 0 { "" } else { ONES[ones as usize] };
            format!("{} {}", TENS[(n / 10) as usize], ones_word)
                .trim()
                .to_string()
        }
    }
}

/// Words for `n < 1000`. Larger values fall back to the year rules.
pub fn number_to_words(n: u32) -> String {
    if n < 100 {
        return two_digits(n);
    }
    if n < 1000 {
        let rest = n % 100;
        let head = format!("{} Hundred", ONES[(n / 100) as usize]);
        return if rest == 0 {
            head
        } else {
            format!("{} {}", head, two_digits(rest))
        };
    }
    year_to_words(n)
}

/// Render a year the way the verification certificates spell it out.
///
/// 1000–1999 all read as "Nineteen …" and anything from 2100 up reads as
/// "Twenty-one Hundred …" plus the remainder mod 2100. Both rules only need to
/// cover living people's birth years.
///
/// A round year in 1000–1999 has no two-digit tail to follow "Nineteen", so
/// it reads "Nineteen Hundred" rather than the bare "Nineteen"; 1800 reads
/// the same as 1900.
pub fn year_to_words(year: u32) -> String {
    match year {
        0..=999 => number_to_words(year),
        1000..=1999 => {
            let rest = year % 100;
            if rest == 0 {
                "Nineteen Hundred".to_string()
            } else {
                format!("Nineteen {}", two_digits(rest))
            }
        }
        2000..=2099 => {
            let rest = year % 100;
            if rest == 0 {
                "Two Thousand".to_string()
            } else {
                format!("Two Thousand {}", two_digits(rest))
            }
        }
        _ => {
            let rest = year % 2100;
            if rest == 0 {
                "Twenty-one Hundred".to_string()
            } else {
                format!("Twenty-one Hundred {}", year_to_words(rest))
            }
        }
    }
}
