//! Line-oriented text format for trained networks.
//!
//! ```text
//! [FORMAT_VERSION 1]               optional, only version 1 exists
//! [SIGMOID_ACTIVATION_FUNCTION]    optional activation marker
//! <L>                              number of activation layers
//! <L-1 bias lines>                 space-separated values
//! <L-1 weight blocks>              one row per line, blocks separated by a blank line
//! ```
//!
//! The final weight block may end without a blank line. Files are written in
//! exactly this layout (without the version line), so files saved by older
//! tools and by this crate are interchangeable.

use crate::activation::{Activation, ActivationKind};
use crate::algebra::{Matrix, Vector};
use crate::error::NetworkIoError;
use crate::network::{layer_shape_problem, NeuralNetwork};
use log::debug;
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Highest format version this reader understands.
pub const FORMAT_VERSION: u32 = 1;

const VERSION_KEY: &str = "FORMAT_VERSION";

/// Parsed contents of a model file.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFile {
    pub version: u32,
    /// Activation marker line, if present.
    pub activation: Option<String>,
    /// Number of activation layers; one more than the number of weight blocks.
    pub layer_count: usize,
    pub biases: Vec<Vector>,
    pub weights: Vec<Matrix>,
}

impl ModelFile {
    pub fn from_network(network: &NeuralNetwork) -> Self {
        Self {
            version: FORMAT_VERSION,
            activation: network.activation().marker().map(str::to_string),
            layer_count: network.layer_count(),
            biases: network.biases().to_vec(),
            weights: network.weights().to_vec(),
        }
    }

    /// Builds the network described by the file.
    ///
    /// A missing activation marker selects the sigmoid.
    pub fn into_network(self) -> Result<NeuralNetwork, NetworkIoError> {
        let kind = match self.activation.as_deref() {
            None => ActivationKind::Sigmoid,
            Some(marker) => ActivationKind::from_marker(marker)
                .ok_or_else(|| NetworkIoError::UnknownActivation(marker.to_string()))?,
        };
        if let Some(message) = layer_shape_problem(&self.weights, &self.biases) {
            return Err(NetworkIoError::Format { line: 0, message });
        }
        Ok(NeuralNetwork::from_parameters(
            self.weights,
            self.biases,
            kind.build(),
        ))
    }
}

impl FromStr for ModelFile {
    type Err = NetworkIoError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut reader = Reader::new(text);

        let mut version = FORMAT_VERSION;
        if let Some(rest) = reader.peek().and_then(|line| line.strip_prefix(VERSION_KEY)) {
            let line = reader.line_number();
            version = rest
                .trim()
                .parse()
                .map_err(|source| NetworkIoError::ParseInt { line, source })?;
            if version != FORMAT_VERSION {
                return Err(NetworkIoError::UnsupportedVersion(version));
            }
            reader.advance();
        }

        let mut activation = None;
        if let Some(line) = reader.peek() {
            if line.starts_with(|c: char| c.is_ascii_alphabetic()) {
                activation = Some(line.to_string());
                reader.advance();
            }
        }

        let (line, count_text) = reader.next_required("layer count")?;
        let layer_count: usize = count_text
            .parse()
            .map_err(|source| NetworkIoError::ParseInt { line, source })?;
        if layer_count < 2 {
            return Err(NetworkIoError::Format {
                line,
                message: format!("layer count must be at least 2, got {layer_count}"),
            });
        }

        let mut biases = Vec::new();
        for _ in 1..layer_count {
            let (line, text) = reader.next_required("bias vector")?;
            if text.is_empty() {
                return Err(NetworkIoError::Format {
                    line,
                    message: "expected a bias vector, found a blank line".to_string(),
                });
            }
            biases.push(Vector::new(parse_values(line, text)?));
        }

        let mut weights = Vec::new();
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut block_start = reader.line_number();
        while let Some((line, text)) = reader.next_line() {
            if text.is_empty() {
                if !rows.is_empty() {
                    weights.push(block_to_matrix(block_start, &rows)?);
                    rows.clear();
                }
                continue;
            }
            if rows.is_empty() {
                block_start = line;
            }
            rows.push(parse_values(line, text)?);
        }
        if !rows.is_empty() {
            weights.push(block_to_matrix(block_start, &rows)?);
        }

        if weights.len() != layer_count - 1 {
            return Err(NetworkIoError::Format {
                line: reader.line_number(),
                message: format!(
                    "expected {} weight blocks, found {}",
                    layer_count - 1,
                    weights.len()
                ),
            });
        }

        Ok(Self {
            version,
            activation,
            layer_count,
            biases,
            weights,
        })
    }
}

impl fmt::Display for ModelFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(marker) = &self.activation {
            writeln!(f, "{marker}")?;
        }
        writeln!(f, "{}", self.layer_count)?;
        for bias in &self.biases {
            writeln!(f, "{bias}")?;
        }
        for weight in &self.weights {
            writeln!(f, "{weight}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Writes `network` to `path`, replacing any existing file.
pub fn save_network<P: AsRef<Path>>(path: P, network: &NeuralNetwork) -> Result<(), NetworkIoError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(fs::File::create(path)?);
    write!(writer, "{}", ModelFile::from_network(network))?;
    writer.flush()?;
    debug!("saved network {:?} to {}", network.sizes(), path.display());
    Ok(())
}

/// Reads a network previously written by [`save_network`].
pub fn load_network<P: AsRef<Path>>(path: P) -> Result<NeuralNetwork, NetworkIoError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let network = text.parse::<ModelFile>()?.into_network()?;
    debug!("loaded network {:?} from {}", network.sizes(), path.display());
    Ok(network)
}

/// Cursor over trimmed lines, tracking 1-based line numbers.
struct Reader<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().map(str::trim).collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Line number of the next unread line.
    fn line_number(&self) -> usize {
        self.pos + 1
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.peek()?;
        let number = self.line_number();
        self.advance();
        Some((number, line))
    }

    fn next_required(&mut self, what: &str) -> Result<(usize, &'a str), NetworkIoError> {
        let line = self.line_number();
        self.next_line().ok_or_else(|| NetworkIoError::Format {
            line,
            message: format!("unexpected end of file, expected {what}"),
        })
    }
}

fn parse_values(line: usize, text: &str) -> Result<Vec<f64>, NetworkIoError> {
    text.split_whitespace()
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|source| NetworkIoError::ParseFloat { line, source })
        })
        .collect()
}

fn block_to_matrix(line: usize, rows: &[Vec<f64>]) -> Result<Matrix, NetworkIoError> {
    let width = rows[0].len();
    if let Some(offset) = rows.iter().position(|row| row.len() != width) {
        return Err(NetworkIoError::Format {
            line: line + offset,
            message: format!(
                "weight row has {} values, expected {width}",
                rows[offset].len()
            ),
        });
    }
    Ok(Matrix::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Sigmoid;
    use std::sync::Arc;

    const LEGACY: &str = "SIGMOID_ACTIVATION_FUNCTION\n\
                          3\n\
                          0.5 -0.5 \n\
                          1.0 \n\
                          1.0 2.0 \n\
                          3.0 4.0 \n\
                          \n\
                          0.25 -0.75 \n\
                          \n";

    #[test]
    fn test_parse_legacy_layout() {
        let file: ModelFile = LEGACY.parse().unwrap();
        assert_eq!(file.activation.as_deref(), Some(Sigmoid::MARKER));
        assert_eq!(file.layer_count, 3);
        assert_eq!(file.biases[0], Vector::new(vec![0.5, -0.5]));
        assert_eq!(file.weights[0], Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]));
        assert_eq!(file.weights[1], Matrix::from_rows(&[vec![0.25, -0.75]]));
    }

    #[test]
    fn test_missing_trailing_blank_line() {
        let text = LEGACY.trim_end();
        let file: ModelFile = text.parse().unwrap();
        assert_eq!(file.weights.len(), 2);
    }

    #[test]
    fn test_marker_is_optional() {
        let text = LEGACY.replacen("SIGMOID_ACTIVATION_FUNCTION\n", "", 1);
        let network = text.parse::<ModelFile>().unwrap().into_network().unwrap();
        assert_eq!(network.activation().marker(), Some(Sigmoid::MARKER));
    }

    #[test]
    fn test_version_line() {
        let text = format!("FORMAT_VERSION 1\n{LEGACY}");
        assert!(text.parse::<ModelFile>().is_ok());

        let text = format!("FORMAT_VERSION 7\n{LEGACY}");
        assert!(matches!(
            text.parse::<ModelFile>(),
            Err(NetworkIoError::UnsupportedVersion(7))
        ));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let text = LEGACY.replace("3.0 4.0", "3.0 four");
        match text.parse::<ModelFile>() {
            Err(NetworkIoError::ParseFloat { line, .. }) => assert_eq!(line, 6),
            other => panic!("expected ParseFloat, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_marker() {
        let text = LEGACY.replace("SIGMOID_ACTIVATION_FUNCTION", "TANH_ACTIVATION_FUNCTION");
        let result = text.parse::<ModelFile>().and_then(ModelFile::into_network);
        assert!(matches!(result, Err(NetworkIoError::UnknownActivation(_))));
    }

    #[test]
    fn test_missing_weight_block() {
        let text = "2\n0.1\n";
        assert!(matches!(
            text.parse::<ModelFile>(),
            Err(NetworkIoError::Format { .. })
        ));
    }

    #[test]
    fn test_ragged_rows() {
        let text = "2\n0.1 0.2\n1 2\n3\n";
        assert!(matches!(
            text.parse::<ModelFile>(),
            Err(NetworkIoError::Format { line: 4, .. })
        ));
    }

    #[test]
    fn test_inconsistent_shapes_rejected() {
        // Bias of length 2 but a single weight row.
        let text = "2\n0.1 0.2\n1 2\n";
        let result = text.parse::<ModelFile>().and_then(ModelFile::into_network);
        assert!(matches!(result, Err(NetworkIoError::Format { .. })));
    }

    #[test]
    fn test_render_matches_layout() {
        let network = NeuralNetwork::from_parameters(
            vec![Matrix::from_rows(&[vec![1.0, -2.5]])],
            vec![Vector::new(vec![0.5])],
            Arc::new(Sigmoid),
        );
        let text = ModelFile::from_network(&network).to_string();
        assert_eq!(text, "SIGMOID_ACTIVATION_FUNCTION\n2\n0.5\n1 -2.5\n\n");
    }

    #[test]
    fn test_render_parse_round_trip_is_exact() {
        let network = NeuralNetwork::from_parameters(
            vec![Matrix::from_rows(&[vec![0.1 + 0.2, 1e-300], vec![-7.123456789012345, 3.0]])],
            vec![Vector::new(vec![std::f64::consts::PI, -1.0 / 3.0])],
            Arc::new(Sigmoid),
        );
        let parsed: ModelFile = ModelFile::from_network(&network).to_string().parse().unwrap();
        assert_eq!(parsed, ModelFile::from_network(&network));
    }
}
