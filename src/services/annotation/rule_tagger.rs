// Rule Tagger
// In-process English annotator: sentence splitting, tokenization, POS/tag
// assignment from a closed-class lexicon plus suffix rules, lemmatization
// and a small gazetteer for PERSON / DATE / TIME entities.

use regex::Regex;
use std::sync::OnceLock;

use super::{AnnotationError, Annotator};
use crate::models::{AnnotatedSentence, Token};
use crate::services::text_processor::split_sentences_advanced;

/// Base forms of verbs common in meeting notes
const VERB_LEXICON: &[&str] = &[
    "add", "agree", "align", "analyze", "announce", "answer", "apply", "approve", "arrange", "ask",
    "assign", "attend", "audit", "book", "brief", "bring", "build", "buy", "call", "cancel", "change",
    "check", "choose", "circulate", "clarify", "clean", "close", "collect", "come", "compare",
    "compile", "complete", "conclude", "configure", "confirm", "contact", "continue", "coordinate",
    "create", "decide", "delegate", "deliver", "deploy", "design", "determine", "discuss",
    "document", "download", "draft", "edit", "email", "ensure", "escalate", "estimate", "evaluate",
    "explore", "finalize", "find", "finish", "fix", "follow", "gather", "get", "give", "go", "handle",
    "help", "hire", "hold", "implement", "inform", "install", "investigate", "invite", "join",
    "keep", "know", "launch", "lead", "leave", "let", "list", "look", "make", "meet", "merge",
    "migrate", "monitor", "move", "need", "notify", "open", "order", "organize", "own", "pay",
    "pick", "plan", "postpone", "prepare", "present", "prioritize", "provide", "publish", "pull",
    "push", "put", "reach", "read", "refactor", "release", "remind", "remove", "reply", "report",
    "reschedule", "research", "resolve", "respond", "review", "run", "say", "schedule", "see",
    "select", "sell", "send", "set", "settle", "share", "ship", "sign", "speak", "start", "stop",
    "submit", "summarize", "support", "sync", "take", "talk", "tell", "test", "think", "track",
    "train", "try", "update", "upload", "use", "validate", "verify", "want", "work", "write",
];

/// Irregular verbs: (base, past, past participle)
const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("begin", "began", "begun"),
    ("bring", "brought", "brought"),
    ("build", "built", "built"),
    ("buy", "bought", "bought"),
    ("choose", "chose", "chosen"),
    ("come", "came", "come"),
    ("find", "found", "found"),
    ("get", "got", "gotten"),
    ("give", "gave", "given"),
    ("go", "went", "gone"),
    ("hold", "held", "held"),
    ("keep", "kept", "kept"),
    ("know", "knew", "known"),
    ("lead", "led", "led"),
    ("leave", "left", "left"),
    ("make", "made", "made"),
    ("meet", "met", "met"),
    ("pay", "paid", "paid"),
    ("run", "ran", "run"),
    ("say", "said", "said"),
    ("see", "saw", "seen"),
    ("sell", "sold", "sold"),
    ("send", "sent", "sent"),
    ("speak", "spoke", "spoken"),
    ("take", "took", "taken"),
    ("tell", "told", "told"),
    ("think", "thought", "thought"),
    ("write", "wrote", "written"),
];

const FIRST_NAMES: &[&str] = &[
    "alex", "alice", "amy", "anna", "ben", "bob", "carlos", "chris", "dan", "david", "emily",
    "emma", "james", "jane", "jennifer", "john", "jose", "kate", "kevin", "laura", "lisa", "maria",
    "mark", "mary", "michael", "mike", "nina", "olivia", "paul", "peter", "priya", "rachel", "raj",
    "robert", "sam", "sara", "sarah", "sophie", "steve", "susan", "tom", "wei",
];

const TITLES: &[&str] = &["mr", "mrs", "ms", "dr", "prof"];

const DATE_WORDS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "january",
    "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december", "today", "tomorrow", "yesterday", "tonight", "eod", "eow", "q1", "q2",
    "q3", "q4",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "al", "ic", "less", "ary"];

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+(?:['’]\w+)*|[^\s\w]").expect("valid token regex"))
}

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\d{1,2}(?::\d{2})?(?:am|pm)$").expect("valid time regex"))
}

/// Split a sentence into surface tokens, separating clitics the way spaCy does
pub fn tokenize(sentence: &str) -> Vec<String> {
    let mut out = Vec::new();
    for m in word_re().find_iter(sentence) {
        let word = m.as_str().replace('’', "'");
        let lower = word.to_lowercase();
        if lower.ends_with("n't") && word.len() > 3 {
            let cut = word.len() - 3;
            out.push(word[..cut].to_string());
            out.push(word[cut..].to_string());
        } else if let Some(idx) = word.find('\'').filter(|i| *i > 0) {
            out.push(word[..idx].to_string());
            out.push(word[idx..].to_string());
        } else {
            out.push(word);
        }
    }
    out
}

fn is_known_verb(lower: &str) -> bool {
    VERB_LEXICON.contains(&lower) || IRREGULAR_VERBS.iter().any(|(base, _, _)| *base == lower)
}

fn irregular_form(lower: &str) -> Option<(&'static str, bool)> {
    IRREGULAR_VERBS.iter().find_map(|(base, past, participle)| {
        if lower == *past && *past != *base {
            Some((*base, lower == *participle))
        } else if lower == *participle && *participle != *base {
            Some((*base, true))
        } else {
            None
        }
    })
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Recover a verb base form from an inflected stem (suffix already removed)
fn verb_stem(stem: &str) -> String {
    if is_known_verb(stem) {
        return stem.to_string();
    }
    let with_e = format!("{}e", stem);
    if is_known_verb(&with_e) {
        return with_e;
    }
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n >= 2 && chars[n - 1] == chars[n - 2] && !matches!(chars[n - 1], 'l' | 's' | 'f' | 'z') {
        let undoubled: String = chars[..n - 1].iter().collect();
        if is_known_verb(&undoubled) || !is_vowel(chars[n - 1]) {
            return undoubled;
        }
    }
    for ending in ["at", "iz", "iv", "ut", "id", "ud", "ur", "ov", "dg", "ac", "nc", "rc", "bl", "pl", "tl", "uc", "in"] {
        if stem.ends_with(ending) && n > 3 {
            return with_e;
        }
    }
    stem.to_string()
}

/// Lemmatize a word given its Penn tag
fn lemmatize(lower: &str, tag: &str) -> String {
    match tag {
        "VBD" | "VBN" => {
            if let Some((base, _)) = irregular_form(lower) {
                return base.to_string();
            }
            if let Some(stem) = lower.strip_suffix("ied") {
                return format!("{}y", stem);
            }
            match lower.strip_suffix("ed") {
                Some(stem) if !stem.is_empty() => verb_stem(stem),
                _ => lower.to_string(),
            }
        }
        "VBG" => match lower.strip_suffix("ing") {
            Some(stem) if stem.len() >= 2 => verb_stem(stem),
            _ => lower.to_string(),
        },
        "VBZ" => {
            if let Some(stem) = lower.strip_suffix("ies") {
                return format!("{}y", stem);
            }
            for es in ["sses", "ches", "shes", "xes", "zes"] {
                if lower.ends_with(es) {
                    return lower[..lower.len() - 2].to_string();
                }
            }
            lower.strip_suffix('s').unwrap_or(lower).to_string()
        }
        "NNS" => {
            if let Some(stem) = lower.strip_suffix("ies").filter(|s| s.len() > 1) {
                return format!("{}y", stem);
            }
            lower.strip_suffix('s').unwrap_or(lower).to_string()
        }
        _ => lower.to_string(),
    }
}

/// Closed-class words: (pos, tag, lemma)
fn closed_class(lower: &str) -> Option<(&'static str, &'static str, &'static str)> {
    let entry = match lower {
        "will" | "'ll" | "wo" => ("AUX", "MD", "will"),
        "would" | "'d" => ("AUX", "MD", "would"),
        "shall" => ("AUX", "MD", "shall"),
        "should" => ("AUX", "MD", "should"),
        "can" | "ca" => ("AUX", "MD", "can"),
        "could" => ("AUX", "MD", "could"),
        "may" => ("AUX", "MD", "may"),
        "might" => ("AUX", "MD", "might"),
        "must" => ("AUX", "MD", "must"),
        "am" | "'m" => ("AUX", "VBP", "be"),
        "are" | "'re" => ("AUX", "VBP", "be"),
        "is" => ("AUX", "VBZ", "be"),
        "was" | "were" => ("AUX", "VBD", "be"),
        "be" => ("AUX", "VB", "be"),
        "been" => ("AUX", "VBN", "be"),
        "being" => ("AUX", "VBG", "be"),
        "do" => ("AUX", "VBP", "do"),
        "does" => ("AUX", "VBZ", "do"),
        "did" => ("AUX", "VBD", "do"),
        "have" | "'ve" => ("VERB", "VBP", "have"),
        "has" => ("VERB", "VBZ", "have"),
        "had" => ("VERB", "VBD", "have"),
        "having" => ("VERB", "VBG", "have"),
        "not" | "n't" => ("PART", "RB", "not"),
        "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "us" | "them" => {
            ("PRON", "PRP", "")
        }
        "her" => ("PRON", "PRP", "her"),
        "my" | "your" | "his" | "its" | "our" | "their" => ("PRON", "PRP$", ""),
        "myself" | "yourself" | "himself" | "herself" | "itself" | "ourselves" | "themselves" => {
            ("PRON", "PRP", "")
        }
        "everyone" | "someone" | "anyone" | "nobody" | "everybody" | "somebody" | "everything"
        | "something" | "anything" | "nothing" => ("PRON", "NN", ""),
        "what" | "who" | "whom" => ("PRON", "WP", ""),
        "which" => ("DET", "WDT", "which"),
        "whose" => ("DET", "WP$", "whose"),
        "how" | "when" | "where" | "why" => ("ADV", "WRB", ""),
        "a" | "an" | "the" | "every" | "each" | "some" | "any" | "no" | "all" | "both"
        | "another" | "either" | "neither" | "this" | "these" | "those" => ("DET", "DT", ""),
        "that" => ("SCONJ", "IN", "that"),
        "of" | "in" | "on" | "at" | "by" | "for" | "with" | "about" | "from" | "into" | "onto"
        | "over" | "under" | "after" | "before" | "during" | "until" | "till" | "within"
        | "without" | "through" | "across" | "against" | "between" | "among" | "via" | "per"
        | "like" | "than" | "since" | "around" | "toward" | "towards" | "upon" => ("ADP", "IN", ""),
        "up" | "out" | "off" | "down" => ("ADP", "RP", ""),
        "to" => ("PART", "TO", "to"),
        "and" | "or" | "but" | "nor" => ("CCONJ", "CC", ""),
        "if" | "whether" | "because" | "although" | "though" | "unless" | "while" | "so" => {
            ("SCONJ", "IN", "")
        }
        "also" | "then" | "now" | "soon" | "already" | "still" | "just" | "very" | "too"
        | "again" | "only" | "even" | "maybe" | "perhaps" | "here" | "there" | "asap" | "later" => {
            ("ADV", "RB", "")
        }
        "today" | "tomorrow" | "yesterday" | "tonight" => ("NOUN", "NN", ""),
        "please" | "yes" | "ok" | "okay" | "thanks" => ("INTJ", "UH", ""),
        _ => return None,
    };
    Some(entry)
}

fn punct_tag(text: &str) -> &'static str {
    match text {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" => ":",
        "-" => "HYPH",
        "(" | "[" => "-LRB-",
        ")" | "]" => "-RRB-",
        "\"" | "'" => "''",
        _ => "NFP",
    }
}

/// Finite verbs that can follow a sentence-initial noun phrase ("Release notes are ...")
fn is_finite_verb_word(lower: &str) -> bool {
    matches!(closed_class(lower), Some(("AUX", tag, _)) if tag != "VB" && tag != "VBN" && tag != "VBG")
        || matches!(lower, "has" | "have" | "had")
}

/// True when the lexicon verb at sentence start heads a noun phrase instead of a command
fn opens_noun_phrase(next_lower: Option<&str>, next2_lower: Option<&str>) -> bool {
    let Some(next) = next_lower else {
        return false;
    };
    if is_finite_verb_word(next) {
        return true;
    }
    let next_is_open_class = closed_class(next).is_none() && next.chars().all(|c| c.is_alphabetic());
    next_is_open_class && next2_lower.map(is_finite_verb_word).unwrap_or(false)
}

fn is_capitalized(text: &str) -> bool {
    text.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

fn is_acronym(text: &str) -> bool {
    text.chars().count() >= 2 && text.chars().all(|c| c.is_ascii_uppercase())
}

/// In-process English annotator with spaCy-style labels
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleTagger;

impl RuleTagger {
    pub const NAME: &'static str = "builtin-rules";

    pub fn new() -> Self {
        Self
    }

    /// Tag a single sentence
    pub fn tag_sentence(&self, sentence: &str) -> Vec<Token> {
        let words = tokenize(sentence);
        let mut tokens: Vec<Token> = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            let lower = word.to_lowercase();
            let prev = tokens.last();
            let next_lower = words.get(i + 1).map(|w| w.to_lowercase());
            let next2_lower = words.get(i + 2).map(|w| w.to_lowercase());
            let (pos, tag) = self.pos_and_tag(
                word,
                &lower,
                i,
                prev,
                next_lower.as_deref(),
                next2_lower.as_deref(),
            );
            let lemma = match closed_class(&lower) {
                Some((_, _, lemma)) if !lemma.is_empty() && pos != "PROPN" => lemma.to_string(),
                _ if pos == "PROPN" || pos == "PUNCT" || pos == "NUM" => word.clone(),
                _ => lemmatize(&lower, tag),
            };
            tokens.push(Token::new(word, pos, tag, &lemma, ""));
        }

        self.refine_auxiliaries(&mut tokens);
        self.assign_entities(&mut tokens);
        tokens
    }

    fn pos_and_tag(
        &self,
        word: &str,
        lower: &str,
        index: usize,
        prev: Option<&Token>,
        next_lower: Option<&str>,
        next2_lower: Option<&str>,
    ) -> (&'static str, &'static str) {
        let first_char = word.chars().next().unwrap_or(' ');
        let is_clitic = word.starts_with('\'') && word.len() > 1;
        if !first_char.is_alphanumeric() && !is_clitic {
            return ("PUNCT", punct_tag(word));
        }
        if first_char.is_ascii_digit() {
            return ("NUM", "CD");
        }

        let prev_tag = prev.map(|t| t.tag.as_str()).unwrap_or("");
        let prev_pos = prev.map(|t| t.pos.as_str()).unwrap_or("");
        let prev_lower = prev.map(|t| t.lower()).unwrap_or_default();
        let sentence_initial = index == 0 || (prev_pos == "PUNCT" && index <= 1);

        // Capitalized mid-sentence words are proper nouns unless they are function words
        if is_capitalized(word) && !sentence_initial {
            if closed_class(lower).is_none() && !(is_known_verb(lower) && prev_tag == "MD") {
                return ("PROPN", "NNP");
            }
        }
        if is_acronym(word) && closed_class(lower).is_none() {
            return ("PROPN", "NNP");
        }

        if lower == "to" {
            let next_is_verb = next_lower.map(|n| is_known_verb(n)).unwrap_or(false);
            return if next_is_verb { ("PART", "TO") } else { ("ADP", "IN") };
        }

        if lower == "'s" {
            return if matches!(prev_pos, "NOUN" | "PROPN") { ("PART", "POS") } else { ("AUX", "VBZ") };
        }

        if lower == "that" && !matches!(prev_pos, "VERB" | "AUX") {
            return ("DET", "DT");
        }

        if let Some((pos, tag, _)) = closed_class(lower) {
            return (pos, tag);
        }

        // Unknown capitalized sentence-initial word that is not a verb: a name or a noun
        if sentence_initial && is_capitalized(word) && !is_known_verb(lower) {
            let followed_by_modal = next_lower
                .map(|n| matches!(closed_class(n), Some((_, "MD", _))) || n == "to")
                .unwrap_or(false);
            if FIRST_NAMES.contains(&lower) || followed_by_modal {
                return ("PROPN", "NNP");
            }
        }

        let after_infinitive_marker = prev_tag == "MD" || prev_tag == "TO" || prev_lower == "let";
        let after_do = prev_pos == "AUX" && matches!(prev_lower.as_str(), "do" | "does" | "did" | "n't" | "not");
        let after_determiner = matches!(prev_pos, "DET" | "ADJ") || prev_tag == "PRP$" || prev_tag == "POS";
        let after_subject = prev_pos == "PRON" && prev_tag == "PRP";
        let after_perfect_or_passive = matches!(prev_lower.as_str(), "have" | "has" | "had" | "'ve")
            || prev.map(|t| t.lemma == "be").unwrap_or(false);

        if is_known_verb(lower) {
            if after_determiner {
                return ("NOUN", "NN");
            }
            if sentence_initial && opens_noun_phrase(next_lower, next2_lower) {
                return ("NOUN", "NN");
            }
            if after_infinitive_marker || after_do || sentence_initial {
                return ("VERB", "VB");
            }
            if after_subject {
                return ("VERB", "VBP");
            }
            if matches!(prev_pos, "ADV" | "PART") && !prev_lower.is_empty() {
                return ("VERB", "VBP");
            }
            return ("NOUN", "NN");
        }

        if let Some((_, is_participle)) = irregular_form(lower) {
            if after_determiner {
                return ("ADJ", "JJ");
            }
            if after_perfect_or_passive && is_participle {
                return ("VERB", "VBN");
            }
            return ("VERB", "VBD");
        }

        if lower.len() > 3 && lower.ends_with("ed") {
            if after_determiner {
                return ("ADJ", "JJ");
            }
            if after_perfect_or_passive {
                return ("VERB", "VBN");
            }
            return ("VERB", "VBD");
        }

        if lower.len() > 4 && lower.ends_with("ing") {
            if after_determiner {
                return ("NOUN", "NN");
            }
            return ("VERB", "VBG");
        }

        if lower.len() > 3 && lower.ends_with("ly") {
            return ("ADV", "RB");
        }

        if ADJECTIVE_SUFFIXES.iter().any(|s| lower.len() > s.len() + 2 && lower.ends_with(s)) {
            return ("ADJ", "JJ");
        }

        if lower.len() > 2 && lower.ends_with('s') && !lower.ends_with("ss") {
            let base = lemmatize(lower, "VBZ");
            if is_known_verb(&base) && matches!(prev_pos, "PROPN" | "NOUN" | "PRON") && !after_determiner {
                return ("VERB", "VBZ");
            }
            return ("NOUN", "NNS");
        }

        ("NOUN", "NN")
    }

    /// Decide between auxiliary and main-verb readings of do/have
    fn refine_auxiliaries(&self, tokens: &mut [Token]) {
        for i in 0..tokens.len() {
            let lower = tokens[i].lower();
            let next = tokens.get(i + 1).map(|t| (t.pos.clone(), t.tag.clone(), t.lower()));
            match lower.as_str() {
                "do" => {
                    // "Do the dishes" is an imperative, "Do we ..." a question
                    if let Some((pos, _, _)) = &next {
                        if i == 0 && pos == "DET" {
                            tokens[i].pos = "VERB".to_string();
                            tokens[i].tag = "VB".to_string();
                        }
                    }
                }
                "have" | "has" | "had" | "'ve" => {
                    let perfect = next
                        .as_ref()
                        .map(|(_, tag, next_lower)| tag == "VBN" || next_lower == "been")
                        .unwrap_or(false);
                    if perfect {
                        tokens[i].pos = "AUX".to_string();
                    }
                }
                _ => {}
            }
        }
    }

    fn assign_entities(&self, tokens: &mut [Token]) {
        for i in 0..tokens.len() {
            let lower = tokens[i].lower();
            if DATE_WORDS.contains(&lower.as_str())
                && (tokens[i].pos == "PROPN" || tokens[i].pos == "NOUN" || lower.starts_with('q'))
                && lower != "may"
            {
                tokens[i].ent_type = "DATE".to_string();
                continue;
            }
            if tokens[i].pos == "NUM" && time_re().is_match(&tokens[i].text) {
                tokens[i].ent_type = "TIME".to_string();
                continue;
            }
            if tokens[i].pos != "PROPN" {
                continue;
            }
            if is_acronym(&tokens[i].text) {
                tokens[i].ent_type = "ORG".to_string();
                continue;
            }

            let prev_lower = if i > 0 { tokens[i - 1].lower() } else { String::new() };
            let prev_is_title = TITLES.contains(&prev_lower.as_str())
                || (prev_lower == "." && i > 1 && TITLES.contains(&tokens[i - 2].lower().as_str()));
            let prev_is_person = i > 0 && tokens[i - 1].ent_type == "PERSON";
            let next_is_modal = tokens
                .get(i + 1)
                .map(|t| t.tag == "MD" || t.lower() == "to")
                .unwrap_or(false);

            if FIRST_NAMES.contains(&lower.as_str()) || prev_is_title || prev_is_person || next_is_modal {
                tokens[i].ent_type = "PERSON".to_string();
                // Surnames following a first name
                let mut j = i + 1;
                while j < tokens.len() && tokens[j].pos == "PROPN" && tokens[j].ent_type.is_empty() {
                    tokens[j].ent_type = "PERSON".to_string();
                    j += 1;
                }
            }
        }
    }
}

impl Annotator for RuleTagger {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSentence>, AnnotationError> {
        Ok(split_sentences_advanced(text)
            .into_iter()
            .map(|s| AnnotatedSentence {
                tokens: self.tag_sentence(&s.text),
                text: s.text,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(sentence: &str) -> Vec<(String, String, String)> {
        RuleTagger::new()
            .tag_sentence(sentence)
            .into_iter()
            .map(|t| (t.text, t.pos, t.tag))
            .collect()
    }

    fn find<'a>(tokens: &'a [Token], text: &str) -> &'a Token {
        tokens.iter().find(|t| t.text == text).unwrap()
    }

    #[test]
    fn test_tokenize_splits_punctuation_and_clitics() {
        assert_eq!(tokenize("We can't ship Q3?"), vec!["We", "ca", "n't", "ship", "Q3", "?"]);
        assert_eq!(tokenize("John's plan."), vec!["John", "'s", "plan", "."]);
    }

    #[test]
    fn test_modal_followed_by_base_verb() {
        let tokens = RuleTagger::new().tag_sentence("John will send the report by Monday.");
        assert_eq!(find(&tokens, "will").tag, "MD");
        let send = find(&tokens, "send");
        assert_eq!((send.pos.as_str(), send.tag.as_str()), ("VERB", "VB"));
        assert_eq!(find(&tokens, "report").pos, "NOUN");
        assert_eq!(find(&tokens, "John").ent_type, "PERSON");
        assert_eq!(find(&tokens, "Monday").ent_type, "DATE");
    }

    #[test]
    fn test_past_tense_lemmas() {
        let tokens = RuleTagger::new().tag_sentence("We decided to ship on Friday.");
        let decided = find(&tokens, "decided");
        assert_eq!((decided.pos.as_str(), decided.tag.as_str()), ("VERB", "VBD"));
        assert_eq!(decided.lemma, "decide");
        assert_eq!(find(&tokens, "to").tag, "TO");
        assert_eq!(find(&tokens, "ship").tag, "VB");
    }

    #[test]
    fn test_lemmatize_rules() {
        assert_eq!(lemmatize("planned", "VBD"), "plan");
        assert_eq!(lemmatize("finalized", "VBN"), "finalize");
        assert_eq!(lemmatize("agreed", "VBD"), "agree");
        assert_eq!(lemmatize("sent", "VBD"), "send");
        assert_eq!(lemmatize("reviewing", "VBG"), "review");
        assert_eq!(lemmatize("pushes", "VBZ"), "push");
        assert_eq!(lemmatize("deliverables", "NNS"), "deliverable");
    }

    #[test]
    fn test_sentence_initial_imperative() {
        let tagged = tags("Send the slides to Maria.");
        assert_eq!(tagged[0], ("Send".to_string(), "VERB".to_string(), "VB".to_string()));
    }

    #[test]
    fn test_sentence_initial_noun_before_verb() {
        let tagged = tags("Design review is complete.");
        assert_eq!(tagged[0], ("Design".to_string(), "NOUN".to_string(), "NN".to_string()));
        assert_eq!(tagged[1].1, "NOUN");

        let tagged = tags("Release notes are published.");
        assert_eq!(tagged[0], ("Release".to_string(), "NOUN".to_string(), "NN".to_string()));
        assert_eq!(tagged[1], ("notes".to_string(), "NOUN".to_string(), "NNS".to_string()));

        let tagged = tags("Review is scheduled for Monday.");
        assert_eq!(tagged[0].1, "NOUN");
    }

    #[test]
    fn test_sentence_initial_verb_with_object_stays_imperative() {
        let tagged = tags("Review the notes before Friday.");
        assert_eq!(tagged[0].2, "VB");
        let tagged = tags("Ask legal whether the terms changed.");
        assert_eq!(tagged[0].2, "VB");
    }

    #[test]
    fn test_question_auxiliary() {
        let tagged = tags("Do we have a budget?");
        assert_eq!(tagged[0].1, "AUX");
        let tagged = tags("Do the dishes.");
        assert_eq!(tagged[0].1, "VERB");
    }

    #[test]
    fn test_perfect_have_is_auxiliary() {
        let tokens = RuleTagger::new().tag_sentence("They have approved the budget.");
        assert_eq!(find(&tokens, "have").pos, "AUX");
        let approved = find(&tokens, "approved");
        assert_eq!(approved.tag, "VBN");
        assert_eq!(approved.lemma, "approve");
    }

    #[test]
    fn test_unknown_name_before_modal_is_person() {
        let tokens = RuleTagger::new().tag_sentence("Oksana should draft the memo.");
        assert_eq!(tokens[0].pos, "PROPN");
        assert_eq!(tokens[0].ent_type, "PERSON");
    }

    #[test]
    fn test_plain_statement_has_no_person_or_modal() {
        let tokens = RuleTagger::new().tag_sentence("The meeting started at 9am.");
        assert!(tokens.iter().all(|t| t.ent_type != "PERSON"));
        assert!(tokens.iter().all(|t| t.tag != "MD"));
        assert_eq!(find(&tokens, "meeting").pos, "NOUN");
        assert_eq!(find(&tokens, "9am").ent_type, "TIME");
    }

    #[test]
    fn test_annotate_splits_sentences() {
        let sentences = RuleTagger::new()
            .annotate("We decided to ship. What is the budget?")
            .unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].tokens[0].text, "What");
        assert_eq!(sentences[1].tokens.last().unwrap().text, "?");
    }

    #[test]
    fn test_empty_text_yields_no_sentences() {
        assert!(RuleTagger::new().annotate("   ").unwrap().is_empty());
        assert!(RuleTagger::new().tag_sentence("").is_empty());
    }
}
