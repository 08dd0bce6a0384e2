//! Class-attribute token operations.
//!
//! These follow the `DOMTokenList` surface from
//! <https://dom.spec.whatwg.org/#interface-domtokenlist>, operating directly
//! on the element's `class` attribute. Tokens are deduplicated in first-seen
//! order; tokens that are empty or contain whitespace are silently skipped
//! rather than raised as errors.

use crate::attr::AttrValue;
use crate::document::Document;
use crate::node::NodeId;

fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

impl Document {
    /// The raw `class` attribute text, or empty.
    #[must_use]
    pub fn class_name(&self, id: NodeId) -> String {
        self.get_attribute(id, "class")
            .and_then(AttrValue::as_str)
            .unwrap_or("")
            .to_owned()
    }

    /// Sets the `class` attribute from `value`, normalized to deduplicated,
    /// single-space-separated tokens.
    pub fn set_class_name(&mut self, id: NodeId, value: &str) {
        let mut tokens: Vec<&str> = Vec::new();
        for token in value.split_whitespace() {
            if is_valid_token(token) && !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        self.set_attribute(id, "class", tokens.join(" "));
    }

    /// The element's class tokens, deduplicated in first-seen order.
    #[must_use]
    pub fn class_tokens(&self, id: NodeId) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        if let Some(AttrValue::Value(value)) = self.get_attribute(id, "class") {
            for token in value.split_whitespace() {
                if !tokens.iter().any(|t| t == token) {
                    tokens.push(token.to_owned());
                }
            }
        }
        tokens
    }

    /// Returns `true` if the element's class list contains `token`.
    #[must_use]
    pub fn class_list_contains(&self, id: NodeId, token: &str) -> bool {
        self.class_tokens(id).iter().any(|t| t == token)
    }

    fn write_class_tokens(&mut self, id: NodeId, tokens: &[String]) {
        self.set_attribute(id, "class", tokens.join(" "));
    }

    /// Adds tokens to the class list, skipping invalid tokens and
    /// duplicates.
    pub fn class_list_add(&mut self, id: NodeId, tokens: &[&str]) {
        if self.attributes(id).is_none() {
            return;
        }
        let mut current = self.class_tokens(id);
        for &token in tokens {
            if is_valid_token(token) && !current.iter().any(|t| t == token) {
                current.push(token.to_owned());
            }
        }
        self.write_class_tokens(id, &current);
    }

    /// Removes tokens from the class list.
    pub fn class_list_remove(&mut self, id: NodeId, tokens: &[&str]) {
        if self.attributes(id).is_none() {
            return;
        }
        let mut current = self.class_tokens(id);
        current.retain(|t| !tokens.contains(&t.as_str()));
        self.write_class_tokens(id, &current);
    }

    /// Toggles a token. With `force`, the token is unconditionally added
    /// (`true`) or removed (`false`). Returns whether the token is present
    /// afterwards.
    pub fn class_list_toggle(&mut self, id: NodeId, token: &str, force: Option<bool>) -> bool {
        if self.attributes(id).is_none() || !is_valid_token(token) {
            return false;
        }
        let mut current = self.class_tokens(id);
        let idx = current.iter().position(|t| t == token);
        let mut present = false;
        match idx {
            Some(i) if force != Some(true) => {
                let _ = current.remove(i);
            }
            _ if force != Some(false) => {
                present = true;
                if idx.is_none() {
                    current.push(token.to_owned());
                }
            }
            _ => {}
        }
        self.write_class_tokens(id, &current);
        present
    }

    /// Replaces `token` with `new_token`. When `new_token` is already
    /// present, `token` is simply removed. Returns `true` if `token` was
    /// present and `new_token` is valid.
    pub fn class_list_replace(&mut self, id: NodeId, token: &str, new_token: &str) -> bool {
        if self.attributes(id).is_none() {
            return false;
        }
        let mut current = self.class_tokens(id);
        let Some(idx) = current.iter().position(|t| t == token) else {
            return false;
        };
        if !is_valid_token(new_token) {
            return false;
        }
        if current.iter().any(|t| t == new_token) {
            let _ = current.remove(idx);
        } else {
            current[idx] = new_token.to_owned();
        }
        self.write_class_tokens(id, &current);
        true
    }
}
