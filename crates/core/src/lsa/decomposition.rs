use nalgebra::DMatrix;

use crate::lsa::{LsaError, tfidf::TfidfMatrix};

const SVD_MAX_ITERATIONS: usize = 10_000;

/// Projects every sentence row into the `num_topics` strongest latent topics
/// (truncated SVD, `U_k * S_k`).
///
/// Components come out in descending singular-value order. Each component's
/// sign is chosen so that its largest-magnitude term loading is positive.
pub fn project_topics(matrix: &TfidfMatrix, num_topics: usize) -> Result<Vec<Vec<f64>>, LsaError> {
    let components = num_topics
        .min(matrix.rows.saturating_sub(1))
        .min(matrix.cols);
    if components == 0 {
        return Err(LsaError::NoComponents);
    }

    let dense = DMatrix::from_row_slice(matrix.rows, matrix.cols, &matrix.data);
    let svd = dense
        .try_svd(true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or(LsaError::DecompositionFailed)?;
    let (Some(u), Some(v_t)) = (svd.u.as_ref(), svd.v_t.as_ref()) else {
        return Err(LsaError::DecompositionFailed);
    };
    let sigma = &svd.singular_values;

    let mut order: Vec<usize> = (0..sigma.len()).collect();
    order.sort_by(|&a, &b| sigma[b].total_cmp(&sigma[a]).then(a.cmp(&b)));

    let mut projected = vec![vec![0.0; components]; matrix.rows];
    for (slot, &component) in order.iter().take(components).enumerate() {
        let loadings = v_t.row(component);
        let dominant = loadings
            .iter()
            .copied()
            .max_by(|a, b| a.abs().total_cmp(&b.abs()))
            .unwrap_or(0.0);
        let sign = if dominant < 0.0 { -1.0 } else { 1.0 };

        for (row, values) in projected.iter_mut().enumerate() {
            values[slot] = sign * u[(row, component)] * sigma[component];
        }
    }

    if projected.iter().flatten().any(|v| !v.is_finite()) {
        return Err(LsaError::DecompositionFailed);
    }

    Ok(projected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: usize, cols: usize, data: Vec<f64>) -> TfidfMatrix {
        TfidfMatrix {
            rows,
            cols,
            data,
            vocabulary: (0..cols).map(|c| format!("t{c}")).collect(),
        }
    }

    #[test]
    fn caps_components_by_rows_and_vocabulary() {
        let m = matrix(3, 2, vec![1.0, 0.0, 0.0, 1.0, 0.6, 0.8]);

        let projected = project_topics(&m, 3).unwrap();

        assert_eq!(projected.len(), 3);
        assert!(projected.iter().all(|row| row.len() == 2));
    }

    #[test]
    fn single_sentence_has_no_topics() {
        let m = matrix(1, 2, vec![0.6, 0.8]);
        assert!(matches!(
            project_topics(&m, 3),
            Err(LsaError::NoComponents)
        ));
    }

    #[test]
    fn first_component_points_along_dominant_direction() {
        // Two sentences share term 0, one stands apart on term 1.
        let m = matrix(3, 2, vec![1.0, 0.0, 1.0, 0.0, 0.0, 1.0]);

        let projected = project_topics(&m, 1).unwrap();

        assert!(projected[0][0] > 0.9);
        assert!(projected[1][0] > 0.9);
        assert!(projected[2][0].abs() < 1e-9);
    }

    #[test]
    fn projection_is_deterministic() {
        let m = matrix(
            4,
            3,
            vec![0.5, 0.5, 0.7, 0.1, 0.9, 0.4, 0.8, 0.2, 0.5, 0.3, 0.3, 0.9],
        );

        assert_eq!(project_topics(&m, 2).unwrap(), project_topics(&m, 2).unwrap());
    }
}
