use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glot_core::conjugation::{CombinationId, ConjugationRule, ConjugationRuleSet, Dimension};
use glot_core::lexicon::{MemoryLexicon, Word};
use glot_core::pronunciation::{PronunciationEngine, PronunciationRule, SyllableGrammar};

const NOUN: u32 = 1;

fn bench_language() -> (MemoryLexicon, ConjugationRuleSet) {
    let mut lexicon = MemoryLexicon::new();
    lexicon.add_part_of_speech(NOUN, "noun");
    for (id, value) in WORDS.iter().enumerate() {
        lexicon.add_word(Word::new(id as u32 + 1, *value, NOUN));
    }

    let mut rules = ConjugationRuleSet::new();
    rules
        .insert_dimension(
            NOUN,
            Dimension::new(1, "number")
                .with_value(1, "singular")
                .with_value(2, "plural"),
        )
        .ok();
    let plural = CombinationId::dimensional(&[2]);
    rules.add_rule(
        ConjugationRule::new(NOUN, plural.clone())
            .named("sibilant")
            .gated_by(".*[sxz]")
            .with_transform("$", "es"),
    );
    rules.add_rule(
        ConjugationRule::new(NOUN, plural.clone())
            .named("y stem")
            .gated_by(".*[^aeiou]y")
            .with_transform("y$", "ies"),
    );
    rules.add_rule(
        ConjugationRule::new(NOUN, plural)
            .named("default")
            .gated_by(".*[^sxzy]")
            .with_transform("$", "s"),
    );
    (lexicon, rules)
}

fn bench_engine(recursion: bool, syllables: bool) -> PronunciationEngine {
    let mut engine = PronunciationEngine::new();
    for (pattern, replacement) in [
        ("c(?=[ei])", "s"),
        ("c", "k"),
        ("ph", "f"),
        ("(?<=[aeiou])s(?=[aeiou])", "z"),
        ("y$", "i"),
    ] {
        engine.add_rule(PronunciationRule::new(pattern, replacement));
    }
    engine.set_recursion_enabled(recursion);

    let mut grammar = SyllableGrammar::new();
    grammar.add_category('C', ["b", "d", "f", "k", "l", "m", "n", "p", "r", "s", "t", "z"]);
    grammar.add_category('V', ["a", "e", "i", "o", "u"]);
    grammar.add_template("(C)V(C)").ok();
    engine.set_syllables(grammar);
    engine.set_syllable_composition_enabled(syllables);
    engine
}

static WORDS: &[&str] = &["box", "city", "cat", "philosophy", "casino"];

fn bench_decline(c: &mut Criterion) {
    let (lexicon, rules) = bench_language();
    let plural = CombinationId::dimensional(&[2]);
    let mut group = c.benchmark_group("conjugation/decline");
    for (id, word) in WORDS.iter().enumerate() {
        let word_id = id as u32 + 1;
        group.bench_with_input(BenchmarkId::new("plural", word), &word_id, |b, &word_id| {
            b.iter(|| rules.decline_word(&lexicon, word_id, &plural));
        });
    }
    group.finish();
}

fn bench_pronounce(c: &mut Criterion) {
    let mut group = c.benchmark_group("pronunciation/pronounce");
    for (label, recursion, syllables) in [
        ("flat", false, false),
        ("recursive", true, false),
        ("syllables", true, true),
    ] {
        let engine = bench_engine(recursion, syllables);
        for &word in WORDS {
            group.bench_with_input(BenchmarkId::new(label, word), &word, |b, &word| {
                b.iter(|| engine.pronounce(word));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_decline, bench_pronounce);
criterion_main!(benches);
