//! Example: scanning text for every occurrence of a word list.
//!
//! Builds an automaton from a word list file (one word per line) or from a
//! small built-in list, then reports every match in the given text, overlapping
//! ones included.
//!
//! Run with: cargo run --example wordscan -- [WORDS_FILE] [TEXT...]
//! Set `RUST_LOG=debug` to see construction logging.

use std::env;
use std::error::Error;

use libaho::automaton::builder::{build_automaton, build_automaton_from_file};
use libaho::Automaton;

const BUILTIN_WORDS: [&str; 7] = ["BAKE", "BAKED", "BAKER", "CAKE", "AKE", "LAKE", "KEBAB"];

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let (mut automaton, words): (Automaton<char, usize>, Vec<String>) = match args.next() {
        Some(path) => {
            let automaton = build_automaton_from_file(&path)?;
            // Repeated words keep only their last ordinal, so the list can have gaps.
            let mut words = Vec::new();
            for (symbols, &ordinal) in automaton.patterns() {
                if words.len() <= ordinal {
                    words.resize(ordinal + 1, String::new());
                }
                words[ordinal] = symbols.into_iter().collect();
            }
            (automaton, words)
        }
        None => (
            build_automaton(BUILTIN_WORDS.iter().enumerate().map(|(i, w)| (*w, i))),
            BUILTIN_WORDS.iter().map(|w| w.to_string()).collect(),
        ),
    };

    let text: String = {
        let rest: Vec<String> = args.collect();
        if rest.is_empty() {
            "THE BAKER BAKED A CAKE BY THE LAKE, THEN ATE KEBAB".to_string()
        } else {
            rest.join(" ")
        }
    };

    println!("{} patterns, {} trie nodes", automaton.len(), automaton.node_count());
    println!("Text: {text}\n");

    let chars: Vec<char> = text.chars().collect();
    automaton.for_each_match(&chars, |&ordinal, begin, end| {
        let found: String = chars[begin..end].iter().collect();
        println!("  {begin:>4}..{end:<4} {found:<12} (word #{ordinal}: {})", words[ordinal]);
        true
    });

    print_dot(&mut automaton);
    Ok(())
}

/// Prints the trie as a DOT graph when `WORDSCAN_DOT` is set.
#[cfg(feature = "dot")]
fn print_dot(automaton: &mut Automaton<char, usize>) {
    if env::var_os("WORDSCAN_DOT").is_some() {
        println!("\n{}", automaton.to_dot());
    }
}

#[cfg(not(feature = "dot"))]
fn print_dot(_: &mut Automaton<char, usize>) {}
