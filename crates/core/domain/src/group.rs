//! 设备分组树
//!
//! 分组树来自协作方接口，节点的 id/name 可能缺失。编辑器的下拉
//! 选项需要一个扁平列表：深度优先展开，父节点先于子节点；缺
//! id 或缺 name 的节点不产出选项，但仍下钻其子树。

/// 分组树节点（协作方接口返回的原始外形）。
#[derive(Debug, Clone, Default)]
pub struct GroupNode {
    pub id: Option<String>,
    pub name: Option<String>,
    pub children: Vec<GroupNode>,
}

/// 扁平化后的分组选项。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOption {
    pub id: String,
    pub name: String,
}

/// 深度优先展开分组树，保持遍历顺序。
pub fn flatten_group_tree(nodes: &[GroupNode]) -> Vec<GroupOption> {
    let mut options = Vec::new();
    for node in nodes {
        push_node(node, &mut options);
    }
    options
}

fn push_node(node: &GroupNode, options: &mut Vec<GroupOption>) {
    if let (Some(id), Some(name)) = (&node.id, &node.name) {
        options.push(GroupOption {
            id: id.clone(),
            name: name.clone(),
        });
    }
    for child in &node.children {
        push_node(child, options);
    }
}
