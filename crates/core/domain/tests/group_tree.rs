use domain::{GroupNode, flatten_group_tree};

fn node(id: &str, name: &str, children: Vec<GroupNode>) -> GroupNode {
    GroupNode {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        children,
    }
}

#[test]
fn flatten_preserves_parent_before_children_order() {
    let tree = vec![
        node(
            "g1",
            "厂区A",
            vec![
                node("g1-1", "一号车间", vec![node("g1-1-1", "产线1", vec![])]),
                node("g1-2", "二号车间", vec![]),
            ],
        ),
        node("g2", "厂区B", vec![]),
    ];

    let ids: Vec<String> = flatten_group_tree(&tree)
        .into_iter()
        .map(|option| option.id)
        .collect();
    assert_eq!(ids, vec!["g1", "g1-1", "g1-1-1", "g1-2", "g2"]);
}

#[test]
fn flatten_skips_incomplete_nodes_but_descends_into_children() {
    let tree = vec![GroupNode {
        id: None,
        name: Some("未命名根".to_string()),
        children: vec![
            node("g1", "可见子组", vec![]),
            GroupNode {
                id: Some("g2".to_string()),
                name: None,
                children: vec![node("g2-1", "深层子组", vec![])],
            },
        ],
    }];

    let options = flatten_group_tree(&tree);
    let ids: Vec<&str> = options.iter().map(|option| option.id.as_str()).collect();
    assert_eq!(ids, vec!["g1", "g2-1"]);
}

#[test]
fn flatten_of_empty_tree_is_empty() {
    assert!(flatten_group_tree(&[]).is_empty());
}
