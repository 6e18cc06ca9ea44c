//! ONNX Runtime backed [`ScoringEngine`].
//!
//! Expects a classifier exported with a single `[N, D]` float input and two
//! outputs: the predicted label and a sequence of class → probability maps
//! (one map per row).

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;
use std::sync::Mutex;

use ort::memory::Allocator;
use ort::session::{builder::GraphOptimizationLevel, Session, SessionOutputs};
use ort::value::{DynMapValueType, DynValue, Tensor};
use tracing::{debug, info};

use crate::inference::engine::{EngineError, EngineOutput, ScoringEngine};
use crate::inference::vectorizer::FeatureVector;

const LABEL_OUTPUT: usize = 0;
const PROBABILITY_OUTPUT: usize = 1;

pub struct OnnxEngine {
    // `Session::run` needs exclusive access.
    session: Mutex<Session>,
    input_name: String,
    input_width: Option<usize>,
}

impl OnnxEngine {
    pub fn open(path: &Path) -> Result<Self, EngineError> {
        let session = Session::builder()
            .map_err(|e| load_error(path, e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_error(path, e))?
            .commit_from_file(path)
            .map_err(|e| load_error(path, e))?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| load_error(path, "model declares no inputs"))?;
        let input_name = input.name.clone();
        let input_width = input
            .input_type
            .tensor_shape()
            .and_then(|shape| shape.last().copied())
            .and_then(|d| usize::try_from(d).ok());

        info!(
            "ONNX model loaded from {} (input '{}', width {:?})",
            path.display(),
            input_name,
            input_width
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            input_width,
        })
    }
}

impl ScoringEngine for OnnxEngine {
    fn input_width(&self) -> Option<usize> {
        self.input_width
    }

    fn run(&self, features: &FeatureVector) -> Result<EngineOutput, EngineError> {
        let input = Tensor::from_array(([1usize, features.len()], features.as_slice().to_vec()))
            .map_err(run_error)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| EngineError::Run("ONNX session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(run_error)?;

        if outputs.len() <= PROBABILITY_OUTPUT {
            return Err(EngineError::Output(format!(
                "expected label and probability outputs, got {}",
                outputs.len()
            )));
        }

        let probabilities = extract_probabilities(&outputs)?;
        let label = match extract_label(&outputs[LABEL_OUTPUT]) {
            Some(label) => label,
            None => {
                debug!("label output unreadable, using the most probable class");
                most_probable(&probabilities)?
            }
        };

        Ok(EngineOutput {
            label,
            probabilities,
        })
    }
}

fn load_error(path: &Path, e: impl Display) -> EngineError {
    EngineError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn run_error(e: impl Display) -> EngineError {
    EngineError::Run(e.to_string())
}

/// Reads the first row's class → probability map, ordered by class label.
fn extract_probabilities(outputs: &SessionOutputs<'_>) -> Result<Vec<(String, f32)>, EngineError> {
    let allocator = Allocator::default();
    let rows = outputs[PROBABILITY_OUTPUT]
        .try_extract_sequence::<DynMapValueType>(&allocator)
        .map_err(|e| EngineError::Output(e.to_string()))?;
    let row = rows
        .first()
        .ok_or_else(|| EngineError::Output("empty probability sequence".to_string()))?;

    if let Ok(map) = row.try_extract_map::<String, f32>() {
        return Ok(map.into_iter().collect::<BTreeMap<_, _>>().into_iter().collect());
    }

    // Integer class labels.
    let map = row
        .try_extract_map::<i64, f32>()
        .map_err(|e| EngineError::Output(e.to_string()))?;
    Ok(map
        .into_iter()
        .collect::<BTreeMap<_, _>>()
        .into_iter()
        .map(|(class, p)| (class.to_string(), p))
        .collect())
}

fn extract_label(value: &DynValue) -> Option<String> {
    if let Ok((_, labels)) = value.try_extract_strings() {
        return labels.into_iter().next();
    }
    value
        .try_extract_tensor::<i64>()
        .ok()
        .and_then(|(_, labels)| labels.first().map(i64::to_string))
}

fn most_probable(probabilities: &[(String, f32)]) -> Result<String, EngineError> {
    probabilities
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(class, _)| class.clone())
        .ok_or_else(|| EngineError::Output("empty probability map".to_string()))
}
