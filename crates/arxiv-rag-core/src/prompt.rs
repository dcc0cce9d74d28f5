//! Prompt assembly from retrieved chunks.

use crate::generate::GenerationRequest;
use crate::models::ScoredChunk;

/// System instruction sent with every question.
pub const SYSTEM_INSTRUCTION: &str = "You are an academic research assistant. \
Answer the user's question using only the provided paper excerpts.";

/// Render retrieved chunks as numbered context blocks, each with its
/// paper title, authors and content.
pub fn build_context(chunks: &[ScoredChunk]) -> String {
    let mut context =
        String::from("The following excerpts were retrieved from relevant papers:\n\n");
    for (i, scored) in chunks.iter().enumerate() {
        let chunk = &scored.chunk;
        context.push_str(&format!(
            "[Paper {}] {}\nAuthors: {}\nContent: {}\n\n",
            i + 1,
            chunk.title(),
            chunk.authors().join(", "),
            chunk.content()
        ));
    }
    context
}

/// Build the user prompt for `question` over `chunks`.
pub fn build_prompt(question: &str, chunks: &[ScoredChunk]) -> String {
    format!(
        "Answer the user's question based on the paper content below.\n\n\
         Paper content:\n{}\n\
         Question: {}\n\n\
         Give an accurate, professional answer and cite the papers you used. \
         If the content is not sufficient to answer, say so.",
        build_context(chunks),
        question
    )
}

/// Full request for the generation boundary.
pub fn build_request(question: &str, chunks: &[ScoredChunk]) -> GenerationRequest {
    GenerationRequest {
        system: SYSTEM_INSTRUCTION.to_string(),
        prompt: build_prompt(question, chunks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{test_paper, Chunk};

    fn scored(id: &str, content: &str) -> ScoredChunk {
        let paper = test_paper(id, content);
        ScoredChunk {
            chunk: Chunk::new(&paper, 0, content).unwrap(),
            score: 0.5,
            position: 0,
        }
    }

    #[test]
    fn test_context_renders_each_chunk() {
        let context = build_context(&[scored("a", "first body"), scored("b", "second body")]);
        assert!(context.contains("[Paper 1] Paper a\n"));
        assert!(context.contains("[Paper 2] Paper b\n"));
        assert!(context.contains("Authors: Ada Lovelace, Alan Turing\n"));
        assert!(context.contains("Content: second body\n"));
        assert!(context.find("first body").unwrap() < context.find("second body").unwrap());
    }

    #[test]
    fn test_context_block_layout() {
        let context = build_context(&[scored("a", "only body")]);
        assert_eq!(
            context,
            "The following excerpts were retrieved from relevant papers:\n\n\
             [Paper 1] Paper a\n\
             Authors: Ada Lovelace, Alan Turing\n\
             Content: only body\n\n"
        );
    }

    #[test]
    fn test_request_carries_question() {
        let request = build_request("What is attention?", &[scored("a", "body")]);
        assert_eq!(request.system, SYSTEM_INSTRUCTION);
        assert!(request.prompt.contains("Question: What is attention?"));
        assert!(request.prompt.contains("Content: body"));
    }
}
