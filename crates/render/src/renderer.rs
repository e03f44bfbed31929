use glam::Vec3;
use roomspace_kernel::{Geometry, Material, NodeKind, Scene, SceneNode};
use std::fmt::Write;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(5.0, 5.0, 15.0),
            target: Vec3::new(0.0, 5.0, 0.0),
            fov_degrees: 75.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a view configuration, then produces
/// output. It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable description of one frame.
///
/// Used for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Include the room fixture nodes in the listing.
    pub show_fixtures: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixtures(mut self) -> Self {
        self.show_fixtures = true;
        self
    }
}

fn describe_geometry(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Plane { width, height } => format!("plane {width:.2}x{height:.2}"),
        Geometry::Cuboid {
            width,
            height,
            depth,
        } => format!("box {width:.2}x{height:.2}x{depth:.2}"),
        Geometry::Cone {
            radius,
            height,
            radial_segments,
        } => format!("cone r={radius:.2} h={height:.2} segments={radial_segments}"),
        Geometry::Model { source, extent } => format!(
            "model {source} extent=({:.2}, {:.2}, {:.2})",
            extent.x, extent.y, extent.z
        ),
    }
}

fn describe_material(material: Option<&Material>) -> String {
    match material {
        Some(Material::Texture { path }) => format!("texture={path}"),
        Some(Material::Color { spec }) => format!("color={spec}"),
        None => "material=source".into(),
    }
}

fn node_line(node: &SceneNode) -> String {
    let p = node.transform.position;
    let r = node.transform.euler_radians();
    let mut line = format!(
        "  {} [{}] pos=({:.2}, {:.2}, {:.2}) rot=({:.1}, {:.1}, {:.1}) {}",
        node.name,
        describe_geometry(&node.geometry),
        p.x,
        p.y,
        p.z,
        r.x.to_degrees(),
        r.y.to_degrees(),
        r.z.to_degrees(),
        describe_material(node.material.as_ref()),
    );
    if node.kind == NodeKind::Model {
        let _ = write!(line, " scale={:.3}", node.transform.scale.x);
    }
    if node.outline.is_some() {
        line.push_str(" [selected]");
    }
    line
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Room (clear=#{:06x}) ===",
            scene.clear_color()
        );
        let _ = writeln!(
            out,
            "Primitives: {}  Models: {}",
            scene.count_of(NodeKind::Primitive),
            scene.count_of(NodeKind::Model)
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        );
        match scene.light() {
            Some(light) => {
                let _ = writeln!(
                    out,
                    "Light: #{:06x} intensity={:.1} pos=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2})",
                    light.color,
                    light.intensity,
                    light.position.x,
                    light.position.y,
                    light.position.z,
                    light.target.x,
                    light.target.y,
                    light.target.z
                );
            }
            None => out.push_str("Light: none\n"),
        }

        for node in scene.nodes().values() {
            if node.kind == NodeKind::Fixture && !self.show_fixtures {
                continue;
            }
            out.push_str(&node_line(node));
            out.push('\n');
        }

        out
    }
}
