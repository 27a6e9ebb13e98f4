use minibayes::{
    Classifier,
    Error,
    Learner,
    MultinomialNB,
    NBayesClassifier,
    Multinomial,
    Sample,
    SampleReader,
};


use polars::prelude::*;
use std::fs;


// Toy example: word counts of 6 short reviews.
//
//            good  fun  bad  boring
//   doc 0 |   2     1    0     0    | +1
//   doc 1 |   1     2    0     0    | +1
//   doc 2 |   3     0    0     1    | +1
//   doc 3 |   0     0    2     1    | -1
//   doc 4 |   0     1    1     2    | -1
//   doc 5 |   0     0    3     0    | -1
fn toy_sample() -> Sample {
    let good = Series::new("good", &[2.0, 1.0, 3.0, 0.0, 0.0, 0.0]);
    let fun = Series::new("fun", &[1.0, 2.0, 0.0, 0.0, 1.0, 0.0]);
    let bad = Series::new("bad", &[0.0, 0.0, 0.0, 2.0, 1.0, 3.0]);
    let boring = Series::new("boring", &[0.0, 0.0, 1.0, 1.0, 2.0, 0.0]);
    let target = Series::new("class", &[1_i64, 1, 1, -1, -1, -1]);

    let df = DataFrame::new(vec![good, fun, bad, boring]).unwrap();
    Sample::from_dataframe(df, target).unwrap()
}


#[test]
fn naive_bayes_toy_test() {
    let sample = toy_sample();

    let f = MultinomialNB::init().fit(&sample).unwrap();
    println!("{f:?}");

    let predictions = f.predict_all(&sample).unwrap();
    assert_eq!(predictions, sample.target().to_vec());
    assert_eq!(f.score(&sample).unwrap(), 1.0);
}


#[test]
fn priors_are_class_frequencies() {
    let rows = vec![
        vec![1.0, 0.0],
        vec![2.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0],
    ];
    let sample = Sample::from_rows(&rows, vec![7, 7, 7, 3]).unwrap();

    let f = MultinomialNB::init().fit(&sample).unwrap();
    assert_eq!(f.classes(), &[3, 7]);

    let priors = f.priors();
    assert!((priors[0] - 0.25).abs() < 1e-12);
    assert!((priors[1] - 0.75).abs() < 1e-12);
}


#[test]
fn uniform_prior() {
    let rows = vec![vec![1.0], vec![2.0], vec![3.0]];
    let sample = Sample::from_rows(&rows, vec![0, 0, 1]).unwrap();

    let f = MultinomialNB::init()
        .fit_prior(false)
        .fit(&sample)
        .unwrap();
    for p in f.priors() {
        assert!((p - 0.5).abs() < 1e-12);
    }
}


#[test]
fn laplace_smoothing_uses_a_per_class_denominator() {
    let sample = toy_sample();
    let f = MultinomialNB::init().fit(&sample).unwrap();

    // Class -1: counts (0, 1, 6, 3), total 10, four words.
    let expected_neg = [1.0 / 14.0, 2.0 / 14.0, 7.0 / 14.0, 4.0 / 14.0];
    // Class +1: counts (6, 3, 0, 1), total 10, four words.
    let expected_pos = [7.0 / 14.0, 4.0 / 14.0, 1.0 / 14.0, 2.0 / 14.0];

    let conditionals = f.conditionals();
    for (got, want) in conditionals[0].probabilities().iter().zip(expected_neg) {
        assert!((got - want).abs() < 1e-12, "{got} != {want}");
    }
    for (got, want) in conditionals[1].probabilities().iter().zip(expected_pos) {
        assert!((got - want).abs() < 1e-12, "{got} != {want}");
    }

    for cond in conditionals {
        let sum = cond.probabilities().iter().sum::<f64>();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}


#[test]
fn alpha_changes_the_estimates() {
    let rows = vec![vec![3.0, 0.0], vec![0.0, 1.0]];
    let sample = Sample::from_rows(&rows, vec![1, 0]).unwrap();

    let f = MultinomialNB::init().alpha(0.5).fit(&sample).unwrap();
    // Class 1: (3 + 0.5) / (3 + 1), (0 + 0.5) / (3 + 1)
    let theta = f.conditionals()[1].probabilities();
    assert!((theta[0] - 0.875).abs() < 1e-12);
    assert!((theta[1] - 0.125).abs() < 1e-12);
}


#[test]
fn predict_proba_is_a_distribution() {
    let sample = toy_sample();
    let f = MultinomialNB::init().fit(&sample).unwrap();

    for row in 0..sample.shape().0 {
        let proba = f.predict_proba(&sample, row).unwrap();
        let sum = proba.iter().sum::<f64>();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    }
}


#[test]
fn unseen_documents() {
    let train = toy_sample();
    let f = MultinomialNB::init().fit(&train).unwrap();

    let rows = vec![
        vec![4.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, 3.0],
        vec![0.0, 0.0, 0.0, 0.0],
    ];
    let test = Sample::from_rows(&rows, Vec::new()).unwrap();
    let predictions = f.predict_all(&test).unwrap();

    assert_eq!(predictions[0], 1);
    assert_eq!(predictions[1], -1);
    // Equal priors and an empty document: the tie goes to the smaller label.
    assert_eq!(predictions[2], -1);
}


#[test]
fn score_is_the_fraction_of_correct_predictions() {
    let train = toy_sample();
    let f = MultinomialNB::init().fit(&train).unwrap();

    let rows = vec![
        vec![4.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, 3.0],
        vec![3.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 5.0, 0.0],
    ];
    // The last two labels are wrong on purpose.
    let test = Sample::from_rows(&rows, vec![1, -1, -1, 1]).unwrap();

    assert_eq!(f.score(&test).unwrap(), 0.5);
}


#[test]
fn errors() {
    let empty = Sample::from_rows(&Vec::<Vec<f64>>::new(), Vec::new()).unwrap();
    assert!(matches!(
        MultinomialNB::init().fit(&empty),
        Err(Error::EmptySample)
    ));

    let unlabeled = Sample::from_rows(&[vec![1.0]], Vec::new()).unwrap();
    assert!(matches!(
        MultinomialNB::init().fit(&unlabeled),
        Err(Error::MissingTarget)
    ));

    let negative = Sample::from_rows(&[vec![1.0, -2.0]], vec![0]).unwrap();
    assert!(matches!(
        MultinomialNB::init().fit(&negative),
        Err(Error::InvalidCount { row: 0, .. })
    ));

    let sample = toy_sample();
    assert!(matches!(
        MultinomialNB::init().alpha(0.0).fit(&sample),
        Err(Error::InvalidParameter { name: "alpha", .. })
    ));

    let f = MultinomialNB::init().fit(&sample).unwrap();
    let narrow = Sample::from_rows(&[vec![1.0, 2.0]], vec![1]).unwrap();
    assert!(matches!(
        f.predict_all(&narrow),
        Err(Error::FeatureMismatch { expected: 4, got: 2 })
    ));

    let unlabeled = Sample::from_rows(&[vec![1.0, 0.0, 0.0, 0.0]], Vec::new())
        .unwrap();
    assert!(matches!(f.score(&unlabeled), Err(Error::MissingTarget)));
}


#[test]
fn row_predictions_check_the_feature_count() {
    let sample = toy_sample();
    let f = MultinomialNB::init().fit(&sample).unwrap();

    let narrow = Sample::from_rows(&[vec![1.0, 2.0]], vec![1]).unwrap();
    assert!(matches!(
        f.predict(&narrow, 0),
        Err(Error::FeatureMismatch { expected: 4, got: 2 })
    ));
    assert!(matches!(
        f.predict_proba(&narrow, 0),
        Err(Error::FeatureMismatch { expected: 4, got: 2 })
    ));
    assert!(matches!(
        f.log_probabilities(&narrow, 0),
        Err(Error::FeatureMismatch { expected: 4, got: 2 })
    ));

    let wide = Sample::from_rows(&[vec![1.0; 5]], vec![1]).unwrap();
    assert!(matches!(
        f.predict_proba(&wide, 0),
        Err(Error::FeatureMismatch { expected: 4, got: 5 })
    ));

    assert_eq!(f.predict(&sample, 0).unwrap(), 1);
    assert_eq!(f.predict(&sample, 5).unwrap(), -1);
}


#[test]
fn json_round_trip_keeps_predictions() {
    let sample = toy_sample();
    let f = MultinomialNB::init().fit(&sample).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    f.save_json(&path).unwrap();

    let g = NBayesClassifier::<Multinomial>::load_json(&path).unwrap();
    assert_eq!(f, g);
    assert_eq!(
        f.predict_all(&sample).unwrap(),
        g.predict_all(&sample).unwrap(),
    );
}


#[test]
fn svmlight_test_file_with_fewer_indices() {
    let dir = tempfile::tempdir().unwrap();

    // Training uses the indices 1 to 3, the test file only 1 and 2.
    let train_path = dir.path().join("train.svm");
    fs::write(&train_path, "1 1:3 2:1\n1 1:2\n-1 2:3 3:3\n-1 3:2\n")
        .unwrap();
    let test_path = dir.path().join("test.svm");
    fs::write(&test_path, "1 1:4\n-1 2:5\n").unwrap();

    let train = Sample::from_svmlight(&train_path).unwrap();
    let f = MultinomialNB::init().fit(&train).unwrap();
    assert_eq!(f.n_features(), 4);

    let model = dir.path().join("model.json");
    f.save_json(&model).unwrap();
    let g = NBayesClassifier::<Multinomial>::load_json(&model).unwrap();

    // Read at its own width, the test file does not fit the model.
    let test = Sample::from_svmlight(&test_path).unwrap();
    assert!(matches!(
        g.score(&test),
        Err(Error::FeatureMismatch { expected: 4, got: 3 })
    ));

    let test = SampleReader::<_, &str>::new()
        .file(&test_path)
        .n_features(g.n_features())
        .read()
        .unwrap();
    assert_eq!(test.shape(), (2, 4));
    assert_eq!(g.predict_all(&test).unwrap(), vec![1, -1]);
    assert_eq!(g.score(&test).unwrap(), 1.0);
}


#[test]
fn inconsistent_model_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let ln_half = 0.5_f64.ln();

    let cases = [
        // One prior for two classes.
        format!(
            r#"{{"classes":[0,1],"ln_priors":[{ln_half}],
                "conditionals":[{{"ln_theta":[{ln_half},{ln_half}]}},
                                {{"ln_theta":[{ln_half},{ln_half}]}}],
                "n_features":2}}"#
        ),
        // One conditional model for two classes.
        format!(
            r#"{{"classes":[0,1],"ln_priors":[{ln_half},{ln_half}],
                "conditionals":[{{"ln_theta":[{ln_half},{ln_half}]}}],
                "n_features":2}}"#
        ),
        // A conditional model narrower than `n_features`.
        format!(
            r#"{{"classes":[0,1],"ln_priors":[{ln_half},{ln_half}],
                "conditionals":[{{"ln_theta":[{ln_half},{ln_half}]}},
                                {{"ln_theta":[0.0]}}],
                "n_features":2}}"#
        ),
        // Unsorted classes.
        format!(
            r#"{{"classes":[1,0],"ln_priors":[{ln_half},{ln_half}],
                "conditionals":[{{"ln_theta":[{ln_half},{ln_half}]}},
                                {{"ln_theta":[{ln_half},{ln_half}]}}],
                "n_features":2}}"#
        ),
        // No classes at all.
        r#"{"classes":[],"ln_priors":[],"conditionals":[],"n_features":2}"#
            .to_string(),
    ];

    for (k, json) in cases.iter().enumerate() {
        let path = dir.path().join(format!("model{k}.json"));
        fs::write(&path, json).unwrap();
        let loaded = NBayesClassifier::<Multinomial>::load_json(&path);
        assert!(
            matches!(loaded, Err(Error::InvalidModel(_))),
            "case {k}: {loaded:?}"
        );
    }
}
