use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

use crate::models::PuzzleParams;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub puzzle: PuzzleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for paths no route matches
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleConfig {
    pub default_height: usize,
    pub default_width: usize,
    pub default_words: Vec<String>,
    pub max_dimension: usize,
    pub max_words: usize,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            default_height: 10,
            default_width: 10,
            default_words: Vec::new(),
            max_dimension: 50,
            max_words: 100,
        }
    }
}

impl PuzzleConfig {
    /// Params used when a request leaves them out
    pub fn default_params(&self) -> PuzzleParams {
        PuzzleParams {
            height: self.default_height,
            width: self.default_width,
            words: self.default_words.clone(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string()),
        };

        let defaults = PuzzleConfig::default();
        let puzzle = PuzzleConfig {
            default_height: parse_var("PUZZLE_DEFAULT_HEIGHT", defaults.default_height)?,
            default_width: parse_var("PUZZLE_DEFAULT_WIDTH", defaults.default_width)?,
            default_words: env::var("PUZZLE_DEFAULT_WORDS")
                .map(|list| parse_word_list(&list))
                .unwrap_or_default(),
            max_dimension: parse_var("PUZZLE_MAX_DIMENSION", defaults.max_dimension)?,
            max_words: parse_var("PUZZLE_MAX_WORDS", defaults.max_words)?,
        };

        puzzle
            .default_params()
            .validate(puzzle.max_dimension, puzzle.max_words)
            .context("PUZZLE_DEFAULT_* values exceed the configured limits")?;

        Ok(Config { server, puzzle })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number", name)),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated word list, dropping blank entries
pub fn parse_word_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(String::from)
        .collect()
}
