use docstats::{
    load_document, AnalyzerConfig, DocumentAnalyzer, EmptySentencePolicy, Normalizer, ReadMode,
};

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::TestFixture;

const SCENARIO: &str = "Hello world. Stop this now. End.";

/// Loader -> splitter -> engine on the reference scenario
#[test]
fn test_full_pipeline_scenario() {
    let fixture = TestFixture::new();
    let (doc, stop) = fixture.create_inputs(SCENARIO, &["this", "now"]);

    let analyzer = DocumentAnalyzer::load(&doc, &stop, &AnalyzerConfig::default())
        .expect("Load should succeed");

    let sentences: Vec<&str> = analyzer.sentences().iter().map(|s| s.as_str()).collect();
    assert_eq!(sentences, vec!["Hello world", "Stop this now", "End"]);

    let filtered: Vec<String> = analyzer.without_stop_words().into_iter().map(|s| s.text).collect();
    assert_eq!(filtered, vec!["Hello world", "Stop", "End"]);

    assert_eq!(analyzer.word_occurrence_index()["world"], vec![0]);
    assert_eq!(analyzer.first_word_groups()["Stop"], vec!["Stop this now".to_string()]);
    assert_eq!(analyzer.average_sentence_length(), 2.0);
    assert_eq!(analyzer.parity_weighted_sum(), -2);
}

/// Windows line endings in both files behave like bare newlines
#[test]
fn test_crlf_inputs() {
    let fixture = TestFixture::new();
    let doc = fixture.create_file("doc.txt", b"Hello\r\nworld. Stop this\r\nnow. End.");
    let stop = fixture.create_file("stop.txt", b"this\r\nnow\r\n");

    let analyzer = DocumentAnalyzer::load(&doc, &stop, &AnalyzerConfig::default()).unwrap();
    let filtered: Vec<String> = analyzer.without_stop_words().into_iter().map(|s| s.text).collect();
    assert_eq!(filtered, vec!["Hello world", "Stop", "End"]);
}

/// Zero-length document yields one empty sentence and zeroed statistics
#[test]
fn test_empty_document_file() {
    let fixture = TestFixture::new();
    let (doc, stop) = fixture.create_inputs("", &["a"]);

    let analyzer = DocumentAnalyzer::load(&doc, &stop, &AnalyzerConfig::default()).unwrap();
    assert_eq!(analyzer.sentence_count(), 1);
    assert_eq!(analyzer.average_sentence_length(), 0.0);
    assert_eq!(analyzer.parity_weighted_sum(), 0);
    assert!(analyzer.word_occurrence_index().is_empty());
}

/// Memory-mapped and buffered reads produce identical analyses
#[test]
fn test_mmap_matches_buffered() {
    let fixture = TestFixture::new();
    let (doc, stop) = fixture.create_inputs(
        "It was the best of times. It was the worst of times.\nIt was the age of wisdom.",
        &["the", "of"],
    );

    let buffered = DocumentAnalyzer::load(&doc, &stop, &AnalyzerConfig::default()).unwrap();
    let mmap_config = AnalyzerConfig {
        read_mode: ReadMode::Mmap,
        ..AnalyzerConfig::default()
    };
    let mapped = DocumentAnalyzer::load(&doc, &stop, &mmap_config).unwrap();

    assert_eq!(buffered.sentences(), mapped.sentences());
    assert_eq!(buffered.word_occurrence_index(), mapped.word_occurrence_index());
    assert_eq!(buffered.describe(), mapped.describe());
}

/// Async construction agrees with sync construction
#[tokio::test]
async fn test_async_load_matches_sync() {
    let fixture = TestFixture::new();
    let (doc, stop) = fixture.create_inputs(SCENARIO, &["this", "now"]);
    let config = AnalyzerConfig::default();

    let sync = DocumentAnalyzer::load(&doc, &stop, &config).unwrap();
    let async_loaded = DocumentAnalyzer::load_async(&doc, &stop, &config).await.unwrap();

    assert_eq!(sync.sentences(), async_loaded.sentences());
    assert_eq!(sync.stop_words(), async_loaded.stop_words());
}

/// Configuration loaded from TOML changes splitting and matching
#[test]
fn test_toml_config_applied() {
    let fixture = TestFixture::new();
    let (doc, stop) = fixture.create_inputs("The cat.. THE DOG. ", &["the"]);
    let config_path = fixture.create_file(
        "docstats.toml",
        b"lowercase = true\nempty_sentences = \"drop\"\n",
    );

    let config = AnalyzerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.empty_sentences, EmptySentencePolicy::Drop);

    let analyzer = DocumentAnalyzer::load(&doc, &stop, &config).unwrap();
    let sentences: Vec<&str> = analyzer.sentences().iter().map(|s| s.as_str()).collect();
    assert_eq!(sentences, vec!["the cat", "the dog"]);

    let filtered: Vec<String> = analyzer.without_stop_words().into_iter().map(|s| s.text).collect();
    assert_eq!(filtered, vec!["cat", "dog"]);
    assert_eq!(analyzer.occurrence_count("the").unwrap(), 2);
}

/// The whole-document loader agrees with the vocabulary the engine indexes
#[test]
fn test_load_document_vocabulary_matches_index() {
    let fixture = TestFixture::new();
    let (doc, stop) = fixture.create_inputs("Alpha beta. Gamma, alpha!\nDelta.", &[]);
    let config = AnalyzerConfig::default();

    let normalizer = Normalizer::new(&config).unwrap();
    let whole = load_document(&doc, ReadMode::Buffered, &normalizer).unwrap();
    assert_eq!(whole.as_str(), "Alpha beta Gamma alpha Delta");

    let analyzer = DocumentAnalyzer::load(&doc, &stop, &config).unwrap();
    assert_eq!(analyzer.normalized_text(), whole);

    let mut vocabulary = whole.distinct_words();
    vocabulary.sort_unstable();
    let index = analyzer.word_occurrence_index();
    let indexed: Vec<&str> = index.keys().map(String::as_str).collect();
    assert_eq!(indexed, vocabulary);
}

/// A document file ending in a newline has no trailing empty sentence
#[test]
fn test_trailing_newline_document() {
    let fixture = TestFixture::new();
    let (doc, stop) = fixture.create_inputs("Hello world. Stop this now. End.\n", &["this", "now"]);

    let analyzer = DocumentAnalyzer::load(&doc, &stop, &AnalyzerConfig::default()).unwrap();
    let sentences: Vec<&str> = analyzer.sentences().iter().map(|s| s.as_str()).collect();
    assert_eq!(sentences, vec!["Hello world", "Stop this now", "End"]);
    assert_eq!(analyzer.average_sentence_length(), 2.0);
    assert_eq!(analyzer.parity_weighted_sum(), -2);
}
