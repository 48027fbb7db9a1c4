//! Parameter estimation: bounded Nelder-Mead minimization and
//! Gauss-Newton standard errors for the fitted coefficients.

/// Options for the simplex minimizer.
#[derive(Debug, Clone)]
pub struct SimplexOptions {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the spread of simplex function values.
    pub tolerance: f64,
    /// Step used to build the initial simplex around the start point.
    pub initial_step: f64,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            initial_step: 0.05,
        }
    }
}

/// Outcome of a simplex minimization.
#[derive(Debug, Clone)]
pub struct SimplexOutcome {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective value at the best point.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the value spread fell below tolerance.
    pub converged: bool,
}

fn clamp_to(bounds: &[(f64, f64)], point: &mut [f64]) {
    for (value, &(lo, hi)) in point.iter_mut().zip(bounds) {
        *value = value.clamp(lo, hi);
    }
}

/// Minimize `objective` with the Nelder-Mead simplex method, keeping
/// every trial point inside `bounds`.
pub fn minimize<F>(
    mut objective: F,
    initial: &[f64],
    bounds: &[(f64, f64)],
    opts: &SimplexOptions,
) -> SimplexOutcome
where
    F: FnMut(&[f64]) -> f64,
{
    const ALPHA: f64 = 1.0; // reflection
    const GAMMA: f64 = 2.0; // expansion
    const RHO: f64 = 0.5; // contraction
    const SIGMA: f64 = 0.5; // shrink

    let dim = initial.len();
    if dim == 0 {
        return SimplexOutcome {
            point: vec![],
            value: objective(&[]),
            iterations: 0,
            converged: true,
        };
    }

    // Initial simplex: the start point plus one perturbed vertex per axis.
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
    let mut start = initial.to_vec();
    clamp_to(bounds, &mut start);
    let start_value = objective(&start);
    simplex.push((start.clone(), start_value));
    for i in 0..dim {
        let mut vertex = start.clone();
        let step = if vertex[i].abs() > 1e-8 {
            vertex[i].abs() * opts.initial_step
        } else {
            opts.initial_step
        };
        vertex[i] += step;
        clamp_to(bounds, &mut vertex);
        let value = objective(&vertex);
        simplex.push((vertex, value));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < opts.max_iter {
        iterations += 1;
        simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let spread = simplex[dim].1 - simplex[0].1;
        if spread.abs() < opts.tolerance {
            converged = true;
            break;
        }

        // Centroid of all vertices but the worst.
        let mut centroid = vec![0.0; dim];
        for (vertex, _) in &simplex[..dim] {
            for (c, v) in centroid.iter_mut().zip(vertex) {
                *c += v / dim as f64;
            }
        }

        let worst = simplex[dim].clone();
        let mut reflected: Vec<f64> = centroid
            .iter()
            .zip(&worst.0)
            .map(|(c, w)| c + ALPHA * (c - w))
            .collect();
        clamp_to(bounds, &mut reflected);
        let reflected_value = objective(&reflected);

        if reflected_value < simplex[0].1 {
            // Try to expand further in the same direction.
            let mut expanded: Vec<f64> = centroid
                .iter()
                .zip(&reflected)
                .map(|(c, r)| c + GAMMA * (r - c))
                .collect();
            clamp_to(bounds, &mut expanded);
            let expanded_value = objective(&expanded);
            simplex[dim] = if expanded_value < reflected_value {
                (expanded, expanded_value)
            } else {
                (reflected, reflected_value)
            };
        } else if reflected_value < simplex[dim - 1].1 {
            simplex[dim] = (reflected, reflected_value);
        } else {
            // Contract toward the centroid.
            let mut contracted: Vec<f64> = centroid
                .iter()
                .zip(&worst.0)
                .map(|(c, w)| c + RHO * (w - c))
                .collect();
            clamp_to(bounds, &mut contracted);
            let contracted_value = objective(&contracted);

            if contracted_value < worst.1 {
                simplex[dim] = (contracted, contracted_value);
            } else {
                // Shrink everything toward the best vertex.
                let best = simplex[0].0.clone();
                for entry in simplex.iter_mut().skip(1) {
                    for (v, b) in entry.0.iter_mut().zip(&best) {
                        *v = b + SIGMA * (*v - b);
                    }
                    clamp_to(bounds, &mut entry.0);
                    entry.1 = objective(&entry.0);
                }
            }
        }
    }

    simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    let (point, value) = simplex.swap_remove(0);
    SimplexOutcome {
        point,
        value,
        iterations,
        converged,
    }
}

/// Invert a small symmetric positive-definite matrix with Gauss-Jordan
/// elimination and partial pivoting. Returns `None` when singular.
fn invert(matrix: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let k = matrix.len();
    let mut work: Vec<Vec<f64>> = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut extended = row.clone();
            extended.extend((0..k).map(|j| if i == j { 1.0 } else { 0.0 }));
            extended
        })
        .collect();

    for col in 0..k {
        let pivot_row = (col..k).max_by(|&a, &b| {
            work[a][col]
                .abs()
                .partial_cmp(&work[b][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if work[pivot_row][col].abs() < 1e-12 {
            return None;
        }
        work.swap(col, pivot_row);

        let pivot = work[col][col];
        for value in work[col].iter_mut() {
            *value /= pivot;
        }
        let pivot_values = work[col].clone();
        for row in 0..k {
            if row == col {
                continue;
            }
            let factor = work[row][col];
            if factor == 0.0 {
                continue;
            }
            for (value, &p) in work[row].iter_mut().zip(&pivot_values) {
                *value -= factor * p;
            }
        }
    }

    Some(work.into_iter().map(|row| row[k..].to_vec()).collect())
}

/// Standard errors of least-squares parameter estimates via the
/// Gauss-Newton approximation: cov = sigma2 * (J'J)^-1, with the
/// residual Jacobian taken by central differences at the optimum.
///
/// Returns `None` when the information matrix is singular.
pub fn gauss_newton_se<F>(residual_fn: F, params: &[f64], sigma2: f64) -> Option<Vec<f64>>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let k = params.len();
    if k == 0 {
        return Some(vec![]);
    }

    let base = residual_fn(params);
    let n = base.len();
    if n <= k {
        return None;
    }

    let mut jacobian = vec![vec![0.0; k]; n];
    for j in 0..k {
        let eps = 1e-5 * params[j].abs().max(1.0);
        let mut forward = params.to_vec();
        forward[j] += eps;
        let mut backward = params.to_vec();
        backward[j] -= eps;
        let rf = residual_fn(&forward);
        let rb = residual_fn(&backward);
        if rf.len() != n || rb.len() != n {
            return None;
        }
        for t in 0..n {
            jacobian[t][j] = (rf[t] - rb[t]) / (2.0 * eps);
        }
    }

    let mut jtj = vec![vec![0.0; k]; k];
    for row in &jacobian {
        for i in 0..k {
            for j in 0..k {
                jtj[i][j] += row[i] * row[j];
            }
        }
    }

    let inverse = invert(&jtj)?;
    let se: Vec<f64> = (0..k)
        .map(|i| {
            let var = sigma2 * inverse[i][i];
            if var >= 0.0 {
                var.sqrt()
            } else {
                f64::NAN
            }
        })
        .collect();
    Some(se)
}
