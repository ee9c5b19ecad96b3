//! End-to-end pipeline tests: sessions → similarity → dendrogram + embedding.

#[cfg(test)]
mod tests {
    use crate::{
        ClassicalScaling, GroupNode, HierarchicalClustering, Linkage, Session, SimilarityMatrix,
    };

    const CLOTHING: [&str; 3] = ["shirts", "hoodies", "jackets"];
    const SUPPORT: [&str; 3] = ["faq", "shipping", "returns"];

    fn selected() -> Vec<String> {
        CLOTHING
            .iter()
            .chain(SUPPORT.iter())
            .map(|s| s.to_string())
            .collect()
    }

    /// Three participants sorting a small storefront catalog. Everyone
    /// separates clothing from support content; they disagree on the finer
    /// structure.
    fn study_sessions() -> Vec<Session> {
        vec![
            Session::new(
                "p1",
                vec![
                    GroupNode::new("clothing").with_items(CLOTHING),
                    GroupNode::new("help").with_items(SUPPORT),
                ],
            ),
            Session::new(
                "p2",
                vec![
                    GroupNode::new("tops").with_items(["shirts", "hoodies"]),
                    GroupNode::new("outerwear").with_items(["jackets"]),
                    GroupNode::new("support").with_items(["faq", "returns"]),
                    GroupNode::new("delivery").with_items(["shipping"]),
                ],
            ),
            Session::new(
                "p3",
                vec![
                    GroupNode::new("clothes").with_items(CLOTHING),
                    GroupNode::new("questions").with_items(["faq", "shipping"]),
                    GroupNode::new("other").with_items(["returns"]),
                ],
            ),
        ]
    }

    #[test]
    fn test_similarity_reflects_agreement() {
        let m = SimilarityMatrix::from_sessions(&study_sessions(), &selected()).unwrap();

        // Every item appears in every session.
        for i in 0..6 {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..6 {
                assert_eq!(m.get(i, j), m.get(j, i));
                assert!(m.get(i, j) >= 0.0 && m.get(i, j) <= 1.0);
            }
        }

        // shirts + hoodies ride together in all three sessions.
        assert_eq!(m.get(0, 1), 1.0);
        // jackets joins them in two of three.
        assert!((m.get(0, 2) - 2.0 / 3.0).abs() < 1e-12);
        // Clothing never mixes with support content.
        for c in 0..3 {
            for s in 3..6 {
                assert_eq!(m.get(c, s), 0.0);
            }
        }
    }

    #[test]
    fn test_dendrogram_recovers_the_two_themes() {
        let m = SimilarityMatrix::from_sessions(&study_sessions(), &selected()).unwrap();
        let root = HierarchicalClustering::new()
            .with_linkage(Linkage::Average)
            .fit(&m)
            .unwrap();

        assert_eq!(root.n_leaves(), 6);
        assert_eq!(root.n_merges(), 5);
        // Themes are fully disjoint, so the last merge is at distance 1.
        assert!((root.height() - 1.0).abs() < 1e-12);

        let mut clusters: Vec<Vec<&str>> = root.cut_at(0.6);
        for c in &mut clusters {
            c.sort_unstable();
        }
        clusters.sort();
        assert_eq!(
            clusters,
            vec![
                vec!["faq", "returns", "shipping"],
                vec!["hoodies", "jackets", "shirts"],
            ]
        );
    }

    #[test]
    fn test_embedding_separates_the_themes() {
        let m = SimilarityMatrix::from_sessions(&study_sessions(), &selected()).unwrap();
        let e = ClassicalScaling::new(2).with_seed(17).fit(&m).unwrap();

        let dist = |i: usize, j: usize| {
            e.point(i)
                .iter()
                .zip(e.point(j).iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt()
        };

        let mut within = Vec::new();
        let mut cross = Vec::new();
        for i in 0..6 {
            for j in (i + 1)..6 {
                if (i < 3) == (j < 3) {
                    within.push(dist(i, j));
                } else {
                    cross.push(dist(i, j));
                }
            }
        }
        let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
        assert!(
            mean(&within) < mean(&cross),
            "themes should separate: within {:?} cross {:?}",
            within,
            cross
        );

        // shirts and hoodies have identical dissimilarity profiles, so
        // they land (nearly) on top of each other.
        assert!(dist(0, 1) < 0.05);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let sessions = study_sessions();
        let selected = selected();

        let m1 = SimilarityMatrix::from_sessions(&sessions, &selected).unwrap();
        let m2 = SimilarityMatrix::from_sessions(&sessions, &selected).unwrap();
        assert_eq!(m1.similarity(), m2.similarity());
        assert_eq!(m1.cooccurrence(), m2.cooccurrence());

        let t1 = HierarchicalClustering::new().fit(&m1).unwrap();
        let t2 = HierarchicalClustering::new().fit(&m2).unwrap();
        assert_eq!(t1, t2);

        let e1 = ClassicalScaling::new(2).with_seed(99).fit(&m1).unwrap();
        let e2 = ClassicalScaling::new(2).with_seed(99).fit(&m2).unwrap();
        assert_eq!(e1.coords(), e2.coords());
    }
}
