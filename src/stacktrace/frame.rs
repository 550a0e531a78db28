//! Stack frame identity.
//!
//! A frame is a method descriptor plus optional line number and byte
//! code index. How much of that identifies a frame is decided by a
//! `FrameSeparator`: folding by method merges all call sites of a
//! method, folding by line or byte code index keeps them apart.

use serde::{Deserialize, Serialize};

/// The method a frame executes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Fully qualified type name, empty when unknown
    #[serde(default)]
    pub type_name: String,

    /// Method name
    pub method_name: String,

    /// Formal descriptor, e.g. `(Ljava/lang/String;)V`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// How the frame's method was executing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    Interpreted,
    Jit,
    Inlined,
    Native,
    #[default]
    Unknown,
}

const TRUNCATED_METHOD: &str = "<truncated>";

/// One frame of a stack trace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    pub method: MethodDescriptor,

    /// Source line, when the recording resolved one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Byte code index within the method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bci: Option<u32>,

    #[serde(default)]
    pub frame_type: FrameType,
}

impl Frame {
    pub fn new(type_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Frame {
            method: MethodDescriptor {
                type_name: type_name.into(),
                method_name: method_name.into(),
                signature: None,
            },
            line: None,
            bci: None,
            frame_type: FrameType::Unknown,
        }
    }

    /// The sentinel standing in for the frames a truncated trace lost.
    pub fn unknown() -> Self {
        Frame::new("", TRUNCATED_METHOD)
    }

    pub fn is_unknown(&self) -> bool {
        self.method.type_name.is_empty() && self.method.method_name == TRUNCATED_METHOD
    }

    /// `Type.method` display form, just the method name when the type
    /// is unknown.
    pub fn display_name(&self) -> String {
        if self.method.type_name.is_empty() {
            self.method.method_name.clone()
        } else {
            format!("{}.{}", self.method.type_name, self.method.method_name)
        }
    }
}

/// How precisely frames are told apart, from coarse to fine. Each level
/// includes the identity of the levels before it, so folding by byte
/// code index also separates differing lines and methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FrameCategorization {
    Method,
    Line,
    ByteCodeIndex,
}

/// Frame identity under one categorization, used as the folding key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameKey {
    method: MethodDescriptor,
    line: Option<u32>,
    bci: Option<u32>,
    frame_type: Option<FrameType>,
}

/// Decides when two frames count as the same call site.
#[derive(Debug, Clone, Copy)]
pub struct FrameSeparator {
    categorization: FrameCategorization,
    distinguish_by_optimization: bool,
}

impl FrameSeparator {
    pub fn new(categorization: FrameCategorization, distinguish_by_optimization: bool) -> Self {
        FrameSeparator {
            categorization,
            distinguish_by_optimization,
        }
    }

    pub fn categorization(&self) -> FrameCategorization {
        self.categorization
    }

    /// The identity of `frame` under this separator.
    pub fn key(&self, frame: &Frame) -> FrameKey {
        FrameKey {
            method: frame.method.clone(),
            line: if self.categorization >= FrameCategorization::Line {
                frame.line
            } else {
                None
            },
            bci: if self.categorization >= FrameCategorization::ByteCodeIndex {
                frame.bci
            } else {
                None
            },
            frame_type: if self.distinguish_by_optimization {
                Some(frame.frame_type)
            } else {
                None
            },
        }
    }

    pub fn are_separate(&self, a: &Frame, b: &Frame) -> bool {
        self.key(a) != self.key(b)
    }

    /// Display name of `frame` including the parts this separator
    /// distinguishes by, so split call sites stay visibly apart.
    pub fn frame_name(&self, frame: &Frame) -> String {
        let mut name = frame.display_name();
        if self.categorization >= FrameCategorization::Line {
            if let Some(line) = frame.line {
                name.push_str(&format!(":{}", line));
            }
        }
        if self.categorization >= FrameCategorization::ByteCodeIndex {
            if let Some(bci) = frame.bci {
                name.push_str(&format!("@{}", bci));
            }
        }
        if self.distinguish_by_optimization && frame.frame_type != FrameType::Unknown {
            name.push_str(&format!(" [{:?}]", frame.frame_type));
        }
        name
    }
}

impl Default for FrameSeparator {
    fn default() -> Self {
        FrameSeparator::new(FrameCategorization::Method, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_at(line: u32, bci: u32) -> Frame {
        let mut frame = Frame::new("com.example.Worker", "run");
        frame.line = Some(line);
        frame.bci = Some(bci);
        frame
    }

    #[test]
    fn method_categorization_merges_call_sites() {
        let separator = FrameSeparator::new(FrameCategorization::Method, false);
        assert!(!separator.are_separate(&frame_at(10, 1), &frame_at(20, 2)));
    }

    #[test]
    fn line_categorization_splits_on_line_only() {
        let separator = FrameSeparator::new(FrameCategorization::Line, false);
        assert!(separator.are_separate(&frame_at(10, 1), &frame_at(20, 2)));
        assert!(!separator.are_separate(&frame_at(10, 1), &frame_at(10, 2)));
    }

    #[test]
    fn bci_categorization_splits_on_bci() {
        let separator = FrameSeparator::new(FrameCategorization::ByteCodeIndex, false);
        assert!(separator.are_separate(&frame_at(10, 1), &frame_at(10, 2)));
    }

    #[test]
    fn optimization_split_is_opt_in() {
        let mut interpreted = frame_at(10, 1);
        interpreted.frame_type = FrameType::Interpreted;
        let mut jit = frame_at(10, 1);
        jit.frame_type = FrameType::Jit;

        let plain = FrameSeparator::new(FrameCategorization::Method, false);
        assert!(!plain.are_separate(&interpreted, &jit));
        let strict = FrameSeparator::new(FrameCategorization::Method, true);
        assert!(strict.are_separate(&interpreted, &jit));
    }

    #[test]
    fn names_carry_the_distinguished_parts() {
        let separator = FrameSeparator::new(FrameCategorization::Line, false);
        assert_eq!(
            separator.frame_name(&frame_at(42, 7)),
            "com.example.Worker.run:42"
        );
        assert_eq!(Frame::unknown().display_name(), "<truncated>");
    }
}
