use std::collections::HashMap;
use std::io::Cursor;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use stackner_core::labels::extend_labels;
use stackner_core::{
    FeatureAligner, FeatureConfig, LabelVocabulary, WordPieceTokenizer, WordVocabulary,
    parse_examples,
};

const VOCAB: &str = "[PAD]\n[UNK]\n[CLS]\n[SEP]\nhow\nto\nsort\na\nlist\nin\npy\n##thon\nuse\nsorted\n(\n)\n.\n##s";

const TRAIN: &str = "How\tO\tCTC_PRED:0\tmd_label:O\n\
                     to\tO\tCTC_PRED:0\tmd_label:O\n\
                     sort\tO\tCTC_PRED:0\tmd_label:O\n\
                     a\tO\tCTC_PRED:0\tmd_label:O\n\
                     list\tB-Data_Structure\tCTC_PRED:1\tmd_label:O\n\
                     in\tO\tCTC_PRED:0\tmd_label:O\n\
                     Python\tB-Language\tCTC_PRED:1\tmd_label:O\n\
                     \n\
                     use\tO\tCTC_PRED:0\tmd_label:O\n\
                     sorted()\tB-Function\tCTC_PRED:1\tmd_label:Name\n\
                     .\tO\tCTC_PRED:0\tmd_label:O\n";

fn bench_convert(c: &mut Criterion) {
    let sentences = parse_examples(Cursor::new(TRAIN), "train").unwrap();
    let tokenizer = WordPieceTokenizer::from_vocab_text(VOCAB, true).unwrap();
    let labels = LabelVocabulary::new(extend_labels([
        "B-Data_Structure",
        "B-Language",
        "B-Function",
    ]))
    .unwrap();
    let words: HashMap<String, u32> = [("**PAD**", 0), ("**UNK**", 1), ("list", 2), ("python", 3)]
        .into_iter()
        .map(|(w, i)| (w.to_string(), i))
        .collect();
    let words = WordVocabulary::new(words).unwrap();

    let aligner =
        FeatureAligner::new(&tokenizer, &labels, &words, FeatureConfig::default()).unwrap();

    c.bench_function("convert_single", |b| {
        b.iter(|| aligner.convert(black_box(&sentences[0])).unwrap());
    });

    c.bench_function("convert_all_2", |b| {
        b.iter(|| aligner.convert_all(black_box(&sentences)).unwrap());
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
