//! Input validation for prompts, TLDs and candidate names

use crate::error::Result;
use crate::{internal_error, validation_error};
use regex::Regex;
use std::collections::HashSet;

/// Shortest accepted prompt, in characters.
pub const MIN_PROMPT_CHARS: usize = 20;
/// Longest accepted prompt, in characters.
pub const MAX_PROMPT_CHARS: usize = 150;
/// Most TLDs accepted in one request.
pub const MAX_TLDS: usize = 10;

/// Validator for everything that crosses the HTTP boundary or comes back
/// from the text-generation provider.
#[derive(Debug, Clone, Default)]
pub struct DomainValidator;

impl DomainValidator {
    /// Create a new domain validator
    pub fn new() -> Self {
        Self
    }

    /// Check the prompt length, ignoring surrounding whitespace.
    ///
    /// The prompt itself is not rewritten; callers forward it as received.
    pub fn validate_prompt(&self, prompt: &str) -> Result<()> {
        let chars = prompt.trim().chars().count();

        if chars < MIN_PROMPT_CHARS {
            return Err(validation_error!(
                "Prompt too short ({} characters, min {})",
                chars,
                MIN_PROMPT_CHARS
            ));
        }

        if chars > MAX_PROMPT_CHARS {
            return Err(validation_error!(
                "Prompt too long ({} characters, max {})",
                chars,
                MAX_PROMPT_CHARS
            ));
        }

        Ok(())
    }

    /// Validate the requested TLD list. Order is kept as given.
    pub fn validate_tlds(&self, tlds: &[String]) -> Result<()> {
        if tlds.is_empty() {
            return Err(validation_error!("At least one TLD is required"));
        }

        if tlds.len() > MAX_TLDS {
            return Err(validation_error!("Too many TLDs ({}, max {})", tlds.len(), MAX_TLDS));
        }

        let mut seen = HashSet::new();
        for tld in tlds {
            self.validate_tld(tld)?;
            if !seen.insert(tld.as_str()) {
                return Err(validation_error!("Duplicate TLD '{}'", tld));
            }
        }

        Ok(())
    }

    /// Validate a single TLD of the form `.label(.label)*`
    ///
    /// Letters of either case are accepted and passed on untouched.
    pub fn validate_tld(&self, tld: &str) -> Result<()> {
        if tld.len() < 2 {
            return Err(validation_error!("TLD '{}' too short", tld));
        }

        if tld.len() > 64 {
            return Err(validation_error!("TLD '{}' too long (max 64 characters)", tld));
        }

        let tld_regex = Regex::new(r"^(\.[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?)+$")
            .map_err(|e| internal_error!("TLD pattern: {}", e))?;

        if !tld_regex.is_match(tld) {
            return Err(validation_error!(
                "Invalid TLD format '{}' (expected e.g. \".com\")",
                tld
            ));
        }

        Ok(())
    }

    /// Validate a candidate base name and return it trimmed, spelling kept.
    pub fn validate_label(&self, name: &str) -> Result<String> {
        let label = name.trim();

        if label.is_empty() {
            return Err(validation_error!("Domain label cannot be empty"));
        }

        if label.len() > 63 {
            return Err(validation_error!("Domain label too long (max 63 characters)"));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(validation_error!("Domain label cannot start or end with hyphen"));
        }

        let valid_chars = Regex::new(r"^[a-zA-Z0-9-]+$")
            .map_err(|e| internal_error!("label pattern: {}", e))?;

        if !valid_chars.is_match(label) {
            return Err(validation_error!(
                "Domain label '{}' contains invalid characters",
                label
            ));
        }

        Ok(label.to_string())
    }
}
