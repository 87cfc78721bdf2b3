//! Built-in practice content.
//!
//! Fixed pools of lower-case ASCII text, one per category. The pools are
//! data, not configuration: they ship with the binary so the trainer works
//! offline out of the box.

use strum::{Display, EnumIter, EnumString, VariantNames};

/// Built-in practice categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, VariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Words,
    Sentences,
    Quotes,
    Code,
    Numbers,
}

impl Category {
    /// Human-readable name for menus.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Words => "Common Words",
            Self::Sentences => "Sentences",
            Self::Quotes => "Quotes",
            Self::Code => "Code",
            Self::Numbers => "Numbers",
        }
    }

    /// One-line description for menus.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Words => "the 200 most common words, for finger placement",
            Self::Sentences => "natural prose with varied rhythm",
            Self::Quotes => "famous quotes, motivating and varied",
            Self::Code => "rust snippets, symbols and syntax",
            Self::Numbers => "numeric sequences, for data entry focus",
        }
    }
}

/// The ~200 most common English words.
pub const COMMON_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "it", "for", "not", "on", "with",
    "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say", "her",
    "she", "or", "an", "will", "my", "one", "all", "would", "there", "their", "what", "so", "up",
    "out", "if", "about", "who", "get", "which", "go", "me", "when", "make", "can", "like", "time",
    "no", "just", "him", "know", "take", "people", "into", "year", "your", "good", "some", "could",
    "them", "see", "other", "than", "then", "now", "look", "only", "come", "its", "over", "think",
    "also", "back", "after", "use", "two", "how", "our", "work", "first", "well", "way", "even",
    "new", "want", "because", "any", "these", "give", "day", "most", "us", "great", "between",
    "need", "large", "often", "hand", "high", "place", "hold", "turn", "help", "start", "show",
    "hear", "play", "run", "move", "live", "believe", "bring", "happen", "write", "provide", "sit",
    "stand", "lose", "pay", "meet", "include", "continue", "set", "learn", "change", "lead",
    "understand", "watch", "follow", "stop", "create", "speak", "read", "spend", "grow", "open",
    "walk", "win", "offer", "remember", "love", "consider", "appear", "buy", "wait", "serve",
    "die", "send", "expect", "build", "stay", "fall", "cut", "reach", "kill", "remain", "suggest",
    "raise", "pass", "sell", "require", "report", "decide", "pull", "return", "explain", "hope",
    "develop", "carry", "break", "receive", "agree", "support", "hit", "produce", "eat", "cover",
    "catch", "draw", "choose", "cause", "point", "listen", "realize", "mind", "thought", "word",
    "order", "house", "world", "still", "own", "last", "long", "night", "found", "while", "might",
    "next", "sound", "below", "saw", "something", "both", "few", "those", "always", "until",
];

/// Prose lines: pangrams plus typing-practice advice.
pub const SENTENCES: &[&str] = &[
    "the quick brown fox jumps over the lazy dog",
    "pack my box with five dozen liquor jugs",
    "how vexingly quick daft zebras jump",
    "the five boxing wizards jump quickly",
    "sphinx of black quartz judge my vow",
    "accuracy first and speed will arrive on its own schedule",
    "a steady rhythm beats a fast burst followed by a correction",
    "every keystroke is a small vote for the typist you are becoming",
    "relax your wrists and let your fingers settle into their home row",
    "errors are data points not failures so collect them and move on",
    "muscle memory grows slowly but once grown it never asks for attention",
    "daily practice in small doses outweighs any single heroic session",
    "slow is smooth and smooth is eventually fast",
    "a skilled typist is consistent long before they are quick",
    "clear writing starts with the ability to put thoughts down quickly",
    "good tools matter less than the habit of using them every day",
    "the keyboard is an instrument and practice is how you tune it",
    "watch the text not your hands and trust your fingers to find the keys",
    "progress hides in the sessions that feel too ordinary to count",
    "typing well is mostly the art of not rushing",
];

/// Famous quotes, normalised to lower-case ASCII with the author appended.
pub const QUOTES: &[&str] = &[
    "whether you think you can or you think you cannot you are right henry ford",
    "the only way to do great work is to love what you do steve jobs",
    "in the middle of difficulty lies opportunity albert einstein",
    "it does not matter how slowly you go as long as you do not stop confucius",
    "it always seems impossible until it is done nelson mandela",
    "strive not to be a success but rather to be of value albert einstein",
    "life is what happens to you while you are busy making other plans john lennon",
    "you miss one hundred percent of the shots you never take wayne gretzky",
    "the future belongs to those who believe in the beauty of their dreams eleanor roosevelt",
    "success is not final failure is not fatal it is the courage to continue that counts winston churchill",
    "the best revenge is massive success frank sinatra",
    "do not go where the path may lead go instead where there is no path and leave a trail emerson",
    "two roads diverged in a wood and i took the one less traveled by robert frost",
    "the only limit to our realization of tomorrow will be our doubts of today franklin d roosevelt",
];

/// Rust one-liners, for symbol and syntax practice.
pub const CODE_SNIPPETS: &[&str] = &[
    "fn greet(name: &str) -> String { format!(\"hello {name}\") }",
    "let squares: Vec<u64> = (0..10).map(|n| n * n).collect();",
    "let positive: Vec<i32> = data.iter().filter(|&&x| x > 0).copied().collect();",
    "let content = std::fs::read_to_string(\"file.txt\")?;",
    "items.sort_by_key(|item| item.name.clone());",
    "let words: Vec<&str> = text.trim().split_whitespace().collect();",
    "let count = text.chars().filter(|c| c.is_alphabetic()).count();",
    "let pairs: HashMap<_, _> = keys.iter().zip(values.iter()).collect();",
    "let path = base.join(\"data\").join(\"records.json\");",
    "fn clamp(val: i64, lo: i64, hi: i64) -> i64 { val.max(lo).min(hi) }",
    "let avg = values.iter().sum::<f64>() / values.len().max(1) as f64;",
    "let unique: BTreeSet<&str> = items.iter().copied().collect();",
    "let mut matrix = vec![vec![0u8; cols]; rows];",
    "let chunks: Vec<&[u8]> = data.chunks(size).collect();",
    "impl Display for Node { fn fmt(&self, f: &mut Formatter) -> fmt::Result { write!(f, \"{}\", self.val) } }",
    "let total: u64 = lines.iter().map(|line| line.len() as u64).sum();",
];

/// Numeric sequences.
pub const NUMBERS: &[&str] = &[
    "1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0",
    "3 14159 26535 89793 23846 26433 83279 50288",
    "2 71828 18284 59045 23536 02874 71352 66249",
    "100 200 300 400 500 600 700 800 900 1000",
    "1024 2048 4096 8192 16384 32768 65536 131072",
    "192 168 1 1 255 255 255 0 10 0 0 1 172 16 0 1",
    "42 17 99 3 58 71 24 86 13 67 45 92 36 81 29",
    "1066 1492 1776 1848 1914 1945 1969 1989 2001",
];
