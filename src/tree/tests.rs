use super::*;
use crate::primitives::Matrix;

fn toy() -> (Matrix<f64>, Vec<usize>) {
    // Outlook-style categorical codes after upstream encoding
    let x = Matrix::from_rows(&[
        vec![0.0, 1.0],
        vec![0.0, 0.0],
        vec![1.0, 1.0],
        vec![2.0, 0.0],
    ])
    .expect("valid rows");
    (x, vec![0, 0, 1, 1])
}

fn three_class() -> (Matrix<f64>, Vec<usize>) {
    let x = Matrix::from_vec(
        9,
        2,
        vec![
            1.0, 1.0, 1.2, 0.8, 0.9, 1.1, // class 0
            5.0, 1.0, 5.2, 0.9, 4.8, 1.2, // class 1
            5.0, 6.0, 5.1, 6.2, 4.9, 5.8, // class 2
        ],
    )
    .expect("9x2");
    (x, vec![0, 0, 0, 1, 1, 1, 2, 2, 2])
}

#[test]
fn test_classifier_creation() {
    let clf = C45Classifier::new();
    assert!(!clf.is_fitted());
    assert!(clf.tree().is_none());
    assert_eq!(clf.min_samples_split(), 2);
    assert_eq!(clf.max_depth(), 100);
}

#[test]
fn test_builder_setters() {
    let clf = C45Classifier::default()
        .with_max_depth(5)
        .with_min_samples_split(4)
        .with_random_state(1);
    assert_eq!(clf.max_depth(), 5);
    assert_eq!(clf.min_samples_split(), 4);
}

#[test]
fn test_end_to_end_toy_set() {
    let (x, y) = toy();
    let mut clf = C45Classifier::new()
        .with_min_samples_split(2)
        .with_max_depth(5);
    clf.fit(&x, &y).expect("fit succeeds");
    assert!(clf.is_fitted());
    assert_eq!(clf.predict(&x).expect("predict"), vec![0, 0, 1, 1]);
    assert!((clf.score(&x, &y).expect("score") - 1.0).abs() < 1e-12);
}

#[test]
fn test_three_class_perfect_fit() {
    let (x, y) = three_class();
    let mut clf = C45Classifier::new();
    clf.fit(&x, &y).expect("fit succeeds");
    assert_eq!(clf.predict(&x).expect("predict"), y);

    let tree = clf.tree().expect("fitted");
    assert_eq!(tree.n_leaves(), 3);
    assert_eq!(tree.depth(), 2);
}

#[test]
fn test_predict_one_new_sample() {
    let (x, y) = three_class();
    let mut clf = C45Classifier::new();
    clf.fit(&x, &y).expect("fit succeeds");
    assert_eq!(clf.predict_one(&[1.1, 0.9]).expect("predict"), 0);
    assert_eq!(clf.predict_one(&[5.5, 0.5]).expect("predict"), 1);
    assert_eq!(clf.predict_one(&[5.5, 7.0]).expect("predict"), 2);
}

#[test]
fn test_max_depth_zero_is_global_majority() {
    let x = Matrix::from_vec(5, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0]).expect("5x1");
    let y = vec![0, 0, 0, 1, 1];
    let mut clf = C45Classifier::new().with_max_depth(0);
    clf.fit(&x, &y).expect("fit succeeds");

    let tree = clf.tree().expect("fitted");
    assert_eq!(tree.n_nodes(), 1);
    assert_eq!(tree.node(tree.root()).label(), Some(0));
    assert_eq!(clf.predict(&x).expect("predict"), vec![0; 5]);
}

#[test]
fn test_sparse_labels_supported() {
    let x = Matrix::from_vec(4, 1, vec![0.0, 1.0, 10.0, 11.0]).expect("4x1");
    let y = vec![7, 7, 1000, 1000];
    let mut clf = C45Classifier::new();
    clf.fit(&x, &y).expect("fit succeeds");
    assert_eq!(clf.predict(&x).expect("predict"), y);
}

#[test]
fn test_predict_is_idempotent_and_read_only() {
    let (x, y) = three_class();
    let mut clf = C45Classifier::new();
    clf.fit(&x, &y).expect("fit succeeds");
    let before = clf.tree().cloned();

    let p1 = clf.predict(&x).expect("predict");
    let p2 = clf.predict(&x).expect("predict");
    assert_eq!(p1, p2);
    assert_eq!(clf.tree().cloned(), before);
}

#[test]
fn test_refit_replaces_tree() {
    let (x, y) = toy();
    let mut clf = C45Classifier::new();
    clf.fit(&x, &y).expect("fit succeeds");
    assert_eq!(clf.tree().expect("fitted").n_nodes(), 3);

    clf.fit(&x, &[1, 1, 1, 1]).expect("refit succeeds");
    assert_eq!(clf.tree().expect("fitted").n_nodes(), 1);
    assert_eq!(clf.predict(&x).expect("predict"), vec![1; 4]);
}

#[test]
fn test_fit_zero_samples() {
    let x = Matrix::from_vec(0, 2, Vec::new()).expect("0x2");
    let mut clf = C45Classifier::new();
    let err = clf.fit(&x, &[]).expect_err("empty input rejected");
    assert!(matches!(err, TreeError::InvalidInput { .. }));
}

#[test]
fn test_fit_zero_features() {
    let x = Matrix::from_vec(2, 0, Vec::new()).expect("2x0");
    let mut clf = C45Classifier::new();
    assert!(matches!(
        clf.fit(&x, &[0, 1]),
        Err(TreeError::InvalidInput { .. })
    ));
}

#[test]
fn test_fit_label_length_mismatch() {
    let (x, _) = toy();
    let mut clf = C45Classifier::new();
    let err = clf.fit(&x, &[0, 1]).expect_err("mismatch rejected");
    assert!(matches!(err, TreeError::InvalidInput { .. }));
    assert!(err.to_string().contains("labels=4"));
}

#[test]
fn test_fit_rejects_nan() {
    let x = Matrix::from_vec(2, 2, vec![0.0, 1.0, f64::NAN, 0.0]).expect("2x2");
    let mut clf = C45Classifier::new();
    let err = clf.fit(&x, &[0, 1]).expect_err("NaN rejected");
    assert!(err.to_string().contains("row 1, column 0"));
}

#[test]
fn test_failed_fit_keeps_previous_tree() {
    let (x, y) = toy();
    let mut clf = C45Classifier::new();
    clf.fit(&x, &y).expect("fit succeeds");
    assert!(clf.fit(&x, &[0]).is_err());
    assert_eq!(clf.predict(&x).expect("still fitted"), y);
}

#[test]
fn test_predict_before_fit() {
    let (x, _) = toy();
    let clf = C45Classifier::new();
    assert!(matches!(clf.predict(&x), Err(TreeError::ModelNotTrained)));
    assert!(matches!(
        clf.predict_one(&[0.0, 0.0]),
        Err(TreeError::ModelNotTrained)
    ));
    assert!(matches!(
        clf.score(&x, &[0, 0, 1, 1]),
        Err(TreeError::ModelNotTrained)
    ));
}

#[test]
fn test_predict_feature_count_mismatch() {
    let (x, y) = toy();
    let mut clf = C45Classifier::new();
    clf.fit(&x, &y).expect("fit succeeds");

    let wide = Matrix::from_vec(1, 3, vec![0.0, 0.0, 0.0]).expect("1x3");
    assert!(matches!(
        clf.predict(&wide),
        Err(TreeError::InvalidInput { .. })
    ));
    assert!(clf.predict_one(&[0.0]).is_err());
}

#[test]
fn test_predict_empty_matrix() {
    let (x, y) = toy();
    let mut clf = C45Classifier::new();
    clf.fit(&x, &y).expect("fit succeeds");
    let empty = Matrix::from_vec(0, 2, Vec::new()).expect("0x2");
    assert!(clf.predict(&empty).expect("predict").is_empty());
}

#[test]
fn test_score_partial() {
    let (x, y) = toy();
    let mut clf = C45Classifier::new();
    clf.fit(&x, &y).expect("fit succeeds");
    let acc = clf.score(&x, &[0, 0, 1, 0]).expect("score");
    assert!((acc - 0.75).abs() < 1e-12);
}

#[test]
fn test_seeded_fit_is_reproducible() {
    let (x, y) = three_class();
    let mut a = C45Classifier::new().with_random_state(42);
    let mut b = C45Classifier::new().with_random_state(42);
    a.fit(&x, &y).expect("fit");
    b.fit(&x, &y).expect("fit");
    assert_eq!(a.tree(), b.tree());
    assert_eq!(a.predict(&x).expect("predict"), y);
}

#[test]
fn test_classifier_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<C45Classifier>();
}
