use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use laborrag_cli::{init_tracing, load_settings};
use laborrag_core::config::Settings;
use laborrag_core::data_processor::{resolve_document_paths, DataProcessor};
use laborrag_hybrid::{build_context, RagContext, RetrievedChunk};

#[derive(Parser, Debug)]
#[command(name = "laborrag", about = "Ask questions about Korean labor-law documents")]
struct Cli {
    /// Config file (defaults to ./config.toml).
    #[arg(long, global = true, env = "LABORRAG_CONFIG")]
    config: Option<PathBuf>,

    /// Number of chunks retrieved per question.
    #[arg(long, global = true)]
    top_k: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract and segment the documents without calling any model.
    Chunks {
        /// Print every chunk, not just per-document totals.
        #[arg(long)]
        show: bool,
    },
    /// Answer a single question.
    Ask {
        question: String,
        /// Print the retrieved chunks before the answer.
        #[arg(long)]
        show_context: bool,
    },
    /// Interactive question loop; `quit` or `exit` ends it.
    Chat,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    let top_k = cli.top_k.unwrap_or(settings.retrieval.top_k).max(1);

    match cli.command {
        Command::Chunks { show } => run_chunks(&settings, show),
        Command::Ask { question, show_context } => {
            let question = question.trim();
            anyhow::ensure!(!question.is_empty(), "question must not be empty");
            let context = load_context(settings)?;
            let retrieved = context.retrieve(question, top_k)?;
            if show_context {
                print_retrieved(&retrieved);
            }
            let answer = context.synthesizer().answer(question, &retrieved)?;
            println!("{answer}");
            Ok(())
        }
        Command::Chat => run_chat(&load_context(settings)?, top_k),
    }
}

fn load_context(settings: Settings) -> Result<RagContext> {
    println!("📚 문서에서 텍스트 추출 및 청크 생성 중...");
    let context = build_context(settings).context("failed to build the search context")?;
    println!("✅ 준비 완료 ({} chunks)", context.corpus().len());
    Ok(context)
}

fn run_chunks(settings: &Settings, show: bool) -> Result<()> {
    let paths = resolve_document_paths(settings)?;
    let corpus = DataProcessor::from_settings(settings).process_paths(&paths)?;
    for doc in corpus.documents() {
        let count = corpus.chunks_for(doc.doc_id).count();
        println!("[{}] {} ({}) -> {} chunks", doc.doc_id, doc.source, doc.strategy, count);
        if show {
            for chunk in corpus.chunks_for(doc.doc_id) {
                println!("  #{} [{}] {}", chunk.chunk_id, chunk.article_label(), preview(&chunk.text, 120));
            }
        }
    }
    println!("total: {} documents, {} chunks", corpus.documents().len(), corpus.len());
    Ok(())
}

fn run_chat(context: &RagContext, top_k: usize) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\n질문을 입력하세요 (종료하려면 'quit'): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let question = line?.trim().to_string();
        if question.eq_ignore_ascii_case("quit") || question.eq_ignore_ascii_case("exit") {
            break;
        }
        if question.is_empty() {
            continue;
        }
        println!("\n🔍 검색 중...");
        match context.ask(&question, top_k) {
            Ok(answer) => {
                println!("\n=== 답변 ===");
                println!("{answer}");
            }
            Err(e) => eprintln!("❌ {e}"),
        }
        println!("\n{}", "=".repeat(50));
    }
    Ok(())
}

fn print_retrieved(retrieved: &[RetrievedChunk]) {
    println!("--- {} chunks ---", retrieved.len());
    for r in retrieved {
        let distance = r.distance.map(|d| format!("{d:.3}")).unwrap_or_else(|| "-".to_string());
        let via = if r.keyword_match { "keyword" } else { "semantic" };
        println!(
            "[{}#{}] {} distance={} via={}\n{}\n",
            r.chunk.source,
            r.chunk.chunk_id,
            r.chunk.article_label(),
            distance,
            via,
            preview(&r.chunk.text, 300)
        );
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}
