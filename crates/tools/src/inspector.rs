use roomspace_common::ObjectId;
use roomspace_kernel::{NodeKind, Scene};

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against the scene for debugging and CLI
/// reports.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary(scene: &Scene) -> SceneSummary {
        SceneSummary {
            fixtures: scene.count_of(NodeKind::Fixture),
            primitives: scene.count_of(NodeKind::Primitive),
            models: scene.count_of(NodeKind::Model),
            outlined: scene.outlined_count(),
            has_light: scene.light().is_some(),
            pending_events: scene.events().len(),
        }
    }

    pub fn inspect_node(scene: &Scene, id: ObjectId) -> Option<NodeInfo> {
        scene.get(id).map(|node| {
            let p = node.transform.position;
            let r = node.transform.euler_radians();
            let s = node.transform.scale;
            NodeInfo {
                id,
                name: node.name.clone(),
                kind: node.kind,
                position: p.to_array(),
                rotation_degrees: [r.x.to_degrees(), r.y.to_degrees(), r.z.to_degrees()],
                scale: s.to_array(),
                outlined: node.outline.is_some(),
            }
        })
    }

    /// Node ids of one kind, in scene order.
    pub fn list_nodes(scene: &Scene, kind: NodeKind) -> Vec<ObjectId> {
        scene
            .nodes()
            .iter()
            .filter(|(_, node)| node.kind == kind)
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSummary {
    pub fixtures: usize,
    pub primitives: usize,
    pub models: usize,
    pub outlined: usize,
    pub has_light: bool,
    pub pending_events: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: fixtures={} primitives={} models={} outlined={} light={} pending_events={}",
            self.fixtures,
            self.primitives,
            self.models,
            self.outlined,
            if self.has_light { "yes" } else { "no" },
            self.pending_events
        )
    }
}

/// Detailed info about a single node.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub id: ObjectId,
    pub name: String,
    pub kind: NodeKind,
    pub position: [f32; 3],
    pub rotation_degrees: [f32; 3],
    pub scale: [f32; 3],
    pub outlined: bool,
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} {} [{}] pos=({:.2}, {:.2}, {:.2}) rot=({:.1}, {:.1}, {:.1}) scale=({:.2}, {:.2}, {:.2})",
            self.kind,
            self.name,
            self.id.short(),
            self.position[0],
            self.position[1],
            self.position[2],
            self.rotation_degrees[0],
            self.rotation_degrees[1],
            self.rotation_degrees[2],
            self.scale[0],
            self.scale[1],
            self.scale[2],
        )?;
        if self.outlined {
            write!(f, " outlined")?;
        }
        Ok(())
    }
}
