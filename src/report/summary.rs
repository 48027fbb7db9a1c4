//! Plain-text model summary.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::diagnostics::LjungBoxResult;
use crate::error::Result;
use crate::models::Sarima;

/// Render the fitted model as a readable text block.
pub fn model_summary_text(model: &Sarima, ljung_box: Option<&LjungBoxResult>) -> String {
    let mut text = String::new();
    let heading = format!("{} model summary", model.order());
    let _ = writeln!(text, "{heading}");
    let _ = writeln!(text, "{}", "=".repeat(heading.len()));

    let _ = writeln!(
        text,
        "observations:      {} ({} effective)",
        model.n_obs(),
        model.n_effective()
    );
    if let Some(loglik) = model.loglik() {
        let _ = writeln!(text, "log likelihood:    {loglik:.4}");
    }
    if let Some(aic) = model.aic() {
        let _ = writeln!(text, "AIC:               {aic:.4}");
    }
    if let Some(bic) = model.bic() {
        let _ = writeln!(text, "BIC:               {bic:.4}");
    }
    if let Some(sigma2) = model.sigma2() {
        let _ = writeln!(text, "residual variance: {sigma2:.6}");
    }

    let coefficients = model.coefficients();
    if !coefficients.is_empty() {
        let _ = writeln!(text);
        let _ = writeln!(text, "{:<12} {:>12} {:>12}", "coefficient", "estimate", "std err");
        for (i, (name, value)) in coefficients.iter().enumerate() {
            let se = model
                .standard_errors()
                .and_then(|se| se.get(i))
                .map(|s| format!("{s:.6}"))
                .unwrap_or_else(|| "n/a".to_string());
            let _ = writeln!(text, "{name:<12} {value:>12.6} {se:>12}");
        }
    }

    if let Some(lb) = ljung_box {
        let _ = writeln!(text);
        let _ = writeln!(
            text,
            "Ljung-Box ({} lags): Q={:.4}, df={}, p={:.4}",
            lb.lags, lb.statistic, lb.df, lb.p_value
        );
    }

    text
}

/// Write the model summary to a text file.
pub fn write_model_summary(
    path: &Path,
    model: &Sarima,
    ljung_box: Option<&LjungBoxResult>,
) -> Result<()> {
    fs::write(path, model_summary_text(model, ljung_box))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fitted_model() -> Sarima {
        let values: Vec<f64> = (0..60)
            .map(|i| (10.0 + 0.2 * i as f64 + (i as f64 * 0.8).sin() * 0.3).ln())
            .collect();
        let mut model = Sarima::arima(1, 1, 1);
        model.fit(&values).unwrap();
        model
    }

    #[test]
    fn summary_names_the_order_and_lists_coefficients() {
        let model = fitted_model();
        let text = model_summary_text(&model, None);
        assert!(text.starts_with("ARIMA(1,1,1) model summary"));
        assert!(text.contains("AIC:"));
        assert!(text.contains("intercept"));
        assert!(text.contains("ar1"));
        assert!(text.contains("ma1"));
    }

    #[test]
    fn summary_includes_ljung_box_when_given() {
        let model = fitted_model();
        let lb = LjungBoxResult {
            statistic: 8.4,
            p_value: 0.75,
            lags: 12,
            df: 10,
        };
        let text = model_summary_text(&model, Some(&lb));
        assert!(text.contains("Ljung-Box (12 lags)"));
        assert!(text.contains("p=0.7500"));
    }

    #[test]
    fn writes_non_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        write_model_summary(&path, &fitted_model(), None).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
