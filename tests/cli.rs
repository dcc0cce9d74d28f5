use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn rag_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("rag");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let papers_dir = root.join("papers");
    fs::create_dir_all(papers_dir.join("2024")).unwrap();
    fs::write(
        papers_dir.join("retrieval.json"),
        r#"[
  {
    "paper_id": "2401.00001v1",
    "title": "Sparse Lexical Retrieval",
    "authors": ["Karen Sparck Jones", "Stephen Robertson"],
    "summary": "We revisit inverted indexes and term weighting for sparse lexical retrieval over scientific abstracts.",
    "published": "2024-01-10",
    "updated": "2024-01-12",
    "arxiv_url": "http://arxiv.org/abs/2401.00001v1",
    "pdf_url": "http://arxiv.org/pdf/2401.00001v1"
  },
  {
    "paper_id": "2302.00002v1",
    "title": "Dense Passage Encoders",
    "authors": ["Vladimir Karpukhin"],
    "summary": "Dense retrieval encodes questions and passages with neural networks trained contrastively.",
    "published": "2023-02-01",
    "updated": "2023-02-01",
    "arxiv_url": "http://arxiv.org/abs/2302.00002v1"
  }
]"#,
    )
    .unwrap();
    fs::write(
        papers_dir.join("2024/folding.json"),
        r#"{
  "paper_id": "2405.00003v2",
  "title": "Protein Structure Prediction",
  "authors": ["John Jumper"],
  "summary": "Attention networks predict protein structure from amino acid sequences with high accuracy.",
  "published": "2024-05-20",
  "updated": "2024-06-01",
  "arxiv_url": "http://arxiv.org/abs/2405.00003v2",
  "pdf_url": null
}"#,
    )
    .unwrap();

    let config_content = format!(
        r#"[library]
root = "{}/papers"

[chunking]
chunk_size = 60

[retrieval]
top_k = 3
max_results = 10

[citation]
preview_chars = 40
"#,
        root.display()
    );

    let config_path = config_dir.join("rag.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_rag(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = rag_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run rag binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_sources_lists_library() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) = run_rag(&config_path, &["sources"]);
    assert!(success, "sources failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("library"));
    assert!(stdout.contains("OK"));
    assert!(stdout.contains(" 2 "), "expected 2 files: {}", stdout);
}

#[test]
fn test_search_relevance() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) = run_rag(&config_path, &["search", "retrieval"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Sparse Lexical Retrieval"));
    assert!(stdout.contains("Dense Passage Encoders"));
    assert!(!stdout.contains("Protein Structure Prediction"));
    assert!(stdout.contains("papers: 2"));
}

#[test]
fn test_search_by_date() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, _, success) = run_rag(&config_path, &["search", "", "--sort-by", "date"]);
    assert!(success);
    let protein = stdout.find("2405.00003v2").unwrap();
    let sparse = stdout.find("2401.00001v1").unwrap();
    let dense = stdout.find("2302.00002v1").unwrap();
    assert!(protein < sparse && sparse < dense, "unexpected order: {}", stdout);
}

#[test]
fn test_search_rejects_unknown_sort() {
    let (_tmp, config_path) = setup_test_env();
    let (_, stderr, success) = run_rag(&config_path, &["search", "x", "--sort-by", "citations"]);
    assert!(!success);
    assert!(stderr.contains("citations"));
}

#[test]
fn test_search_no_results() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, _, success) = run_rag(&config_path, &["search", "cosmology"]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_query_ranks_best_chunk_first() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) =
        run_rag(&config_path, &["query", "protein structure amino acid", "--top-k", "1"]);
    assert!(success, "query failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("1. "));
    assert!(stdout.contains("2405.00003v2#"));
    assert!(!stdout.contains("2. "));
}

#[test]
fn test_query_from_restricts_corpus() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, _, success) = run_rag(
        &config_path,
        &["query", "protein structure", "--from", "dense", "--top-k", "10"],
    );
    assert!(success);
    assert!(!stdout.contains("2405.00003v2"));
    assert!(stdout.contains("2302.00002v1"));
}

#[test]
fn test_context_outputs_request_and_citations() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) =
        run_rag(&config_path, &["context", "How does sparse lexical retrieval work?"]);
    assert!(success, "context failed: stdout={}, stderr={}", stdout, stderr);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let citations = json["citations"].as_array().unwrap();
    assert_eq!(citations.len(), 3);
    assert_eq!(citations[0]["paper_id"], "2401.00001v1");
    assert_eq!(citations[0]["chunk_index"], 0);

    let preview = citations[0]["content"].as_str().unwrap();
    assert!(preview.ends_with("..."));
    assert_eq!(preview.chars().count(), 43);

    let prompt = json["request"]["prompt"].as_str().unwrap();
    assert!(prompt.contains("[Paper 1] Sparse Lexical Retrieval"));
    assert!(prompt.contains("Authors: Karen Sparck Jones, Stephen Robertson"));
    assert!(prompt.contains("Question: How does sparse lexical retrieval work?"));
    assert!(json["request"]["system"].as_str().unwrap().len() > 0);
}

#[test]
fn test_context_on_empty_library_fails() {
    let (tmp, config_path) = setup_test_env();
    let papers = tmp.path().join("papers");
    fs::remove_dir_all(&papers).unwrap();
    fs::create_dir_all(&papers).unwrap();

    let (_, stderr, success) = run_rag(&config_path, &["context", "anything"]);
    assert!(!success);
    assert!(stderr.contains("no relevant paper content"));
}

#[test]
fn test_unparseable_library_file_fails() {
    let (tmp, config_path) = setup_test_env();
    fs::write(tmp.path().join("papers/broken.json"), "{ truncated").unwrap();

    let (stdout, stderr, success) = run_rag(&config_path, &["search", "retrieval"]);
    assert!(!success, "search should fail: stdout={}", stdout);
    assert!(stderr.contains("paper search failed"), "stderr={}", stderr);
    assert!(stderr.contains("broken.json"), "stderr={}", stderr);

    let (_, stderr, success) = run_rag(&config_path, &["query", "retrieval"]);
    assert!(!success);
    assert!(stderr.contains("broken.json"));
}

#[test]
fn test_invalid_config_rejected() {
    let (tmp, _) = setup_test_env();
    let bad = tmp.path().join("config/bad.toml");
    fs::write(&bad, "[chunking]\nchunk_size = 0\n").unwrap();
    let (_, stderr, success) = run_rag(&bad, &["sources"]);
    assert!(!success);
    assert!(stderr.contains("chunk_size"));
}
