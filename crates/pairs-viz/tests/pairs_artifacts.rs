use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use pairs_viz::ellipse::chi2_2df_radius;
use pairs_viz::{
    pairs_artifact, AsymptoticFit, CellContent, CellKind, DiagonalMode, DiagonalPanel, Error,
    PairsOptions, PairsWarning, PosteriorSample, TickStagger,
};

fn normal_posterior(n_params: usize, n_draws: usize, seed: u64) -> PosteriorSample {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let columns = (0..n_params)
        .map(|_| (0..n_draws).map(|_| normal.sample(&mut rng)).collect())
        .collect();
    PosteriorSample::from_columns(columns).unwrap()
}

fn identity_fit(n: usize) -> AsymptoticFit {
    let corr = (0..n).map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect()).collect();
    AsymptoticFit::new(
        (0..n).map(|i| format!("theta[{}]", i + 1)).collect(),
        vec![0.0; n],
        vec![1.0; n],
        corr,
    )
    .unwrap()
}

#[test]
fn three_parameter_histogram_scenario() {
    let posterior = normal_posterior(3, 1000, 42);
    let fit = identity_fit(3);
    let opts = PairsOptions::default().with_mode(DiagonalMode::Histogram);

    let art = pairs_artifact(&posterior, &fit, &opts).expect("pairs artifact");

    assert_eq!(art.schema_version, "mcmc_pairs_v0");
    assert_eq!(art.n_params(), 3);
    assert_eq!(art.cells.len(), 9);
    assert!(art.warnings.is_empty());

    for r in &art.ranges {
        assert!(r.low > -5.5 && r.low < -3.0, "low = {}", r.low);
        assert!(r.high > 3.0 && r.high < 5.5, "high = {}", r.high);
        assert!(r.low < -1.96 && r.high > 1.96);
    }

    let radius = chi2_2df_radius(0.95).unwrap();
    for cell in &art.cells {
        match &cell.content {
            CellContent::Diagonal { panel: DiagonalPanel::Histogram { hist, x_range, .. }, .. } => {
                assert_eq!(*x_range, art.ranges[cell.row]);
                let centre: f64 = hist
                    .density
                    .iter()
                    .zip(hist.edges.windows(2))
                    .map(|(d, e)| d * (e[1] - e[0]) * 0.5 * (e[0] + e[1]))
                    .sum();
                assert!(centre.abs() < 0.15, "histogram centre {centre}");
            }
            CellContent::Scatter { ellipse, .. } => {
                for (x, y) in ellipse.points() {
                    assert_abs_diff_eq!((x * x + y * y).sqrt(), radius, epsilon = 1e-9);
                }
            }
            CellContent::CorrelationLabel { r, .. } => {
                assert!(r.expect("defined correlation").abs() < 0.1);
            }
            other => panic!("unexpected cell {:?}", other.kind()),
        }
    }
}

#[test]
fn parameter_count_mismatch_fails_fast() {
    let posterior = normal_posterior(2, 50, 1);
    let fit = identity_fit(3);
    let err = pairs_artifact(&posterior, &fit, &PairsOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
}

#[test]
fn subset_of_one_fails() {
    let posterior = normal_posterior(3, 50, 2);
    let fit = identity_fit(3);
    let err = pairs_artifact(&posterior, &fit, &PairsOptions::default().with_subset(vec![2]))
        .unwrap_err();
    assert!(err.to_string().contains("meaningful only for >1 parameter"));
}

#[test]
fn subset_reorders_consistently() {
    let mut posterior_cols: Vec<Vec<f64>> = Vec::new();
    for shift in [0.0, 10.0, 20.0] {
        posterior_cols.push((0..40).map(|i| shift + (i as f64 * 0.37).sin()).collect());
    }
    let posterior = PosteriorSample::from_columns(posterior_cols).unwrap();
    let fit = AsymptoticFit::new(
        vec!["a".into(), "b".into(), "c".into()],
        vec![0.0, 10.0, 20.0],
        vec![0.5, 0.5, 0.5],
        vec![vec![1.0, 0.2, 0.7], vec![0.2, 1.0, -0.1], vec![0.7, -0.1, 1.0]],
    )
    .unwrap();

    let art =
        pairs_artifact(&posterior, &fit, &PairsOptions::default().with_subset(vec![2, 0])).unwrap();
    assert_eq!(art.parameter_names, vec!["c".to_string(), "a".to_string()]);
    assert_eq!(art.meta.parameter_indices, vec![2, 0]);
    assert!(art.ranges[0].contains(20.0));
    assert!(art.ranges[1].contains(0.0));

    let CellContent::Scatter { mle, ellipse, .. } = &art.cell(1, 0).unwrap().content else {
        panic!("expected scatter");
    };
    // x = "c", y = "a"
    assert_eq!(*mle, (20.0, 0.0));
    let mean_x = ellipse.x.iter().sum::<f64>() / ellipse.len() as f64;
    assert!((mean_x - 20.0).abs() < 0.1);
}

#[test]
fn autocorrelation_is_default_diagonal() {
    let posterior = normal_posterior(2, 200, 3);
    let art = pairs_artifact(&posterior, &identity_fit(2), &PairsOptions::default()).unwrap();
    let CellContent::Diagonal { panel, label, .. } = &art.cell(0, 0).unwrap().content else {
        panic!("expected diagonal");
    };
    assert_eq!(label, "theta[1]");
    let DiagonalPanel::Autocorrelation { acf, y_range } = panel else {
        panic!("expected autocorrelation");
    };
    assert_eq!(acf.len(), 24); // floor(10 * log10(200)) + 1
    assert_abs_diff_eq!(acf[0], 1.0, epsilon = 1e-12);
    assert_eq!((y_range.low, y_range.high), (-1.0, 1.0));
}

#[test]
fn degenerate_parameter_warns_but_renders() {
    let posterior = PosteriorSample::from_columns(vec![
        vec![1.0; 20],
        (0..20).map(|i| i as f64).collect(),
    ])
    .unwrap();
    let fit = AsymptoticFit::new(
        vec!["fixed".into(), "free".into()],
        vec![1.0, 10.0],
        vec![0.0, 3.0],
        vec![vec![1.0, 0.0], vec![0.0, 1.0]],
    )
    .unwrap();

    let art = pairs_artifact(&posterior, &fit, &PairsOptions::default()).unwrap();
    assert!(art.ranges[0].is_degenerate());
    assert_eq!(
        art.warnings,
        vec![PairsWarning::ZeroWidthRange { param: 0, name: "fixed".into() }]
    );
    let CellContent::CorrelationLabel { r, text, .. } = &art.cell(0, 1).unwrap().content else {
        panic!("expected label");
    };
    assert!(r.is_none());
    assert_eq!(text, "NA");
}

#[test]
fn border_overlay_is_independent_of_content() {
    let posterior = normal_posterior(3, 30, 4);
    let art = pairs_artifact(&posterior, &identity_fit(3), &PairsOptions::default()).unwrap();
    for cell in &art.cells {
        assert_eq!(cell.border.bottom.is_some(), cell.row == 2);
        assert_eq!(cell.border.left.is_some(), cell.col == 0);
    }
    // Upper-triangle cell in the left column does not exist; the top-left
    // diagonal still carries a left axis.
    let top_left = art.cell(0, 0).unwrap();
    assert_eq!(top_left.content.kind(), CellKind::Diagonal);
    assert_eq!(top_left.border.left, Some(TickStagger::Near));
}
