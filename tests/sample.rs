use minibayes::{
    Error,
    Format,
    Sample,
    SampleReader,
};

use polars::prelude::*;
use std::fs;


#[test]
fn from_dataframe_casts_integer_counts() {
    let s1 = Series::new("spam", &[1_i64, 0, 3]);
    let s2 = Series::new("ham", &[0.0, 2.0, 1.0]);
    let target = Series::new("class", &[1_i64, 0, 1]);

    let df = DataFrame::new(vec![s1, s2]).unwrap();
    let sample = Sample::from_dataframe(df, target).unwrap();

    assert_eq!(sample.shape(), (3, 2));
    assert_eq!(sample.feature_names(), vec!["spam", "ham"]);
    assert_eq!(sample["spam"][2], 3.0);
    assert_eq!(sample.target(), &[1, 0, 1]);
    assert_eq!(sample.classes(), vec![0, 1]);
    assert_eq!(sample.at(1), (vec![0.0, 2.0], Some(0)));
}


#[test]
fn from_rows_checks_shapes() {
    let rows = vec![vec![1.0, 2.0], vec![3.0]];
    assert!(matches!(
        Sample::from_rows(&rows, Vec::new()),
        Err(Error::FeatureMismatch { expected: 2, got: 1 })
    ));

    let rows = vec![vec![1.0], vec![3.0]];
    assert!(matches!(
        Sample::from_rows(&rows, vec![1]),
        Err(Error::ShapeMismatch { expected: 2, got: 1 })
    ));
}


#[test]
fn csv_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("train.csv");
    fs::write(&path, "good,bad,class\n2,0,1\n0,3,-1\n1,1,1\n").unwrap();

    let sample = SampleReader::new()
        .file(&path)
        .has_header(true)
        .target_feature("class")
        .read()
        .unwrap();

    assert_eq!(sample.shape(), (3, 2));
    assert_eq!(sample.target(), &[1, -1, 1]);
    assert_eq!(sample.row(1), vec![0.0, 3.0]);
    assert!(sample.feature("class").is_none());
}


#[test]
fn csv_without_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("train.csv");
    fs::write(&path, "2,0,1\n\n0,3,-1\n").unwrap();

    let sample = Sample::from_csv(&path, false).unwrap();
    assert_eq!(sample.shape(), (2, 3));
    assert!(!sample.has_target());
    assert_eq!(
        sample.feature_names(),
        vec!["Feat. [1]", "Feat. [2]", "Feat. [3]"]
    );

    let sample = SampleReader::new()
        .file(&path)
        .target_feature("Feat. [3]")
        .read()
        .unwrap();
    assert_eq!(sample.shape(), (2, 2));
    assert_eq!(sample.target(), &[1, -1]);
    assert_eq!(sample.row(1), vec![0.0, 3.0]);
}


#[test]
fn csv_errors() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("ragged.csv");
    fs::write(&path, "a,b,class\n1,2,0\n1,0\n").unwrap();
    assert!(matches!(
        Sample::from_csv(&path, true),
        Err(Error::Parse { line: 3, .. })
    ));

    // The bad label sits on line 3, but it is the second example.
    let path = dir.path().join("fraction.csv");
    fs::write(&path, "a,class\n1,0\n1,0.5\n").unwrap();
    let sample = Sample::from_csv(&path, true).unwrap();
    assert!(matches!(
        sample.set_target("class"),
        Err(Error::InvalidLabel { row: 1, value }) if value == 0.5
    ));

    let path = dir.path().join("nolabel.csv");
    fs::write(&path, "a,b\n1,2\n").unwrap();
    let read = SampleReader::new()
        .file(&path)
        .has_header(true)
        .target_feature("class")
        .read();
    assert!(matches!(read, Err(Error::InvalidParameter { name: "target", .. })));
}


#[test]
fn svmlight_is_sparse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("train.svm");
    fs::write(&path, "1 0:2 2:1\n0 1:3\n\n1 2:4\n").unwrap();

    let sample = SampleReader::<_, &str>::new()
        .file(&path)
        .format(Format::SvmLight)
        .read()
        .unwrap();

    assert_eq!(sample.shape(), (3, 3));
    assert_eq!(sample.target(), &[1, 0, 1]);
    assert!(sample.features().iter().all(|feat| feat.is_sparse()));
    assert_eq!(sample.row(0), vec![2.0, 0.0, 1.0]);
    assert_eq!(sample.row(2), vec![0.0, 0.0, 4.0]);
}


#[test]
fn svmlight_keeps_one_column_per_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gap.svm");
    // Indices 1-indexed, and index 2 never appears.
    fs::write(&path, "1 1:2 3:1\n0 3:4\n").unwrap();

    let sample = Sample::from_svmlight(&path).unwrap();
    assert_eq!(sample.shape(), (2, 4));
    assert_eq!(
        sample.feature_names(),
        vec!["Feat. [0]", "Feat. [1]", "Feat. [2]", "Feat. [3]"]
    );
    assert_eq!(sample["Feat. [3]"][1], 4.0);
    assert_eq!(sample.row(0), vec![0.0, 2.0, 0.0, 1.0]);

    let wide = SampleReader::<_, &str>::new()
        .file(&path)
        .n_features(6)
        .read()
        .unwrap();
    assert_eq!(wide.shape(), (2, 6));
    assert_eq!(wide.row(1), vec![0.0, 0.0, 0.0, 4.0, 0.0, 0.0]);

    // A minimum below the file's width changes nothing.
    let narrow = Sample::from_svmlight_with_width(&path, 2).unwrap();
    assert_eq!(narrow.shape(), (2, 4));
}


#[test]
fn svmlight_errors() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("dup.svm");
    fs::write(&path, "1 0:2 0:1\n").unwrap();
    assert!(matches!(
        Sample::from_svmlight(&path),
        Err(Error::Parse { line: 1, .. })
    ));

    let path = dir.path().join("pair.svm");
    fs::write(&path, "1 0:2\n0 5\n").unwrap();
    assert!(matches!(
        Sample::from_svmlight(&path),
        Err(Error::Parse { line: 2, .. })
    ));
}


#[test]
fn split_keeps_rows_aligned() {
    let rows = (0..6).map(|i| vec![i as f64]).collect::<Vec<_>>();
    let sample = Sample::from_rows(&rows, (0..6).collect()).unwrap();

    let ix = vec![5, 4, 3, 2, 1, 0];
    let (train, test) = sample.split(&ix, 2, 4);

    assert_eq!(test.target(), &[3, 2]);
    assert_eq!(train.target(), &[5, 4, 1, 0]);
    for (i, &y) in train.target().iter().enumerate() {
        assert_eq!(train.row(i), vec![y as f64]);
    }
}
