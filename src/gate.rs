use egui::{Color32, Pos2, Rect, Vec2};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{ShapeId, ShapeRegistry, ShapeStyle, Tag};

/// Dimensions and coupling of a gate symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateLayout {
    /// Size of the body rectangle
    pub width: f32,
    pub height: f32,
    /// Number of input port rectangles
    pub input_count: usize,
    /// Size of each port rectangle
    pub port_width: f32,
    pub port_height: f32,
    /// Gap between the body's left edge and the right edge of the first port
    pub port_offset: f32,
    /// Horizontal distance between consecutive ports
    pub port_spacing: f32,
    pub font_size: f32,
    /// When false, only the picked shape moves and the label and ports stay behind
    pub ports_follow_handle: bool,
}

impl Default for GateLayout {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 50.0,
            input_count: 2,
            port_width: 10.0,
            port_height: 20.0,
            port_offset: 10.0,
            port_spacing: 30.0,
            font_size: 12.0,
            ports_follow_handle: true,
        }
    }
}

impl GateLayout {
    /// Rectangle of port `index` for a gate whose body starts at `origin`
    pub fn port_rect(&self, origin: Pos2, index: usize) -> Rect {
        let right = origin.x - self.port_offset - index as f32 * self.port_spacing;
        Rect::from_min_max(
            Pos2::new(right - self.port_width, origin.y - self.port_height),
            Pos2::new(right, origin.y),
        )
    }

    fn validate(&self) -> CanvasResult<()> {
        let dims = [self.width, self.height, self.port_width, self.port_height, self.font_size];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(CanvasError::InvalidObjectSpec(format!(
                "gate dimensions must be positive, got {:?}",
                dims
            )));
        }
        // offsets may be zero or negative, but must stay finite
        let spacing = [self.port_offset, self.port_spacing];
        if spacing.iter().any(|d| !d.is_finite()) {
            return Err(CanvasError::InvalidObjectSpec(format!(
                "port offset and spacing must be finite, got {:?}",
                spacing
            )));
        }
        Ok(())
    }
}

/// A logic-gate symbol: body handle, centred label and input ports
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    gate_type: String,
    handle: ShapeId,
    label: ShapeId,
    ports: Vec<ShapeId>,
}

impl Gate {
    /// Registers the gate's shapes at `position`.
    ///
    /// Only the body carries tags, so it is the single shape that receives
    /// pointer bindings. Nothing is registered if the parameters are rejected.
    pub fn create(
        gate_type: &str,
        position: Pos2,
        layout: &GateLayout,
        registry: &mut ShapeRegistry,
    ) -> CanvasResult<Self> {
        let gate_type = gate_type.trim();
        if gate_type.is_empty() {
            return Err(CanvasError::InvalidObjectSpec("gate type must not be empty".into()));
        }
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(CanvasError::InvalidObjectSpec(format!(
                "gate position must be finite, got {:?}",
                position
            )));
        }
        layout.validate()?;

        let body = Rect::from_min_size(position, Vec2::new(layout.width, layout.height));
        let handle = registry.add_rectangle(body, ShapeStyle::default(), &[Tag::Movable, Tag::Gate]);
        let label = registry.add_text(
            body.center(),
            gate_type,
            ShapeStyle::text(Color32::BLACK, layout.font_size),
            &[],
        );
        let ports: Vec<ShapeId> = (0..layout.input_count)
            .map(|i| registry.add_rectangle(layout.port_rect(position, i), ShapeStyle::default(), &[]))
            .collect();

        let mut members = vec![label];
        members.extend_from_slice(&ports);
        if layout.ports_follow_handle {
            registry.group(handle, &members)?;
        } else {
            registry.attach(handle, &members)?;
        }

        info!(
            "Created {} gate at ({}, {}) with {} inputs",
            gate_type,
            position.x,
            position.y,
            ports.len()
        );

        Ok(Self {
            gate_type: gate_type.to_string(),
            handle,
            label,
            ports,
        })
    }

    pub fn gate_type(&self) -> &str {
        &self.gate_type
    }

    /// The body rectangle, the shape bound to pointer events
    pub fn handle(&self) -> ShapeId {
        self.handle
    }

    pub fn label(&self) -> ShapeId {
        self.label
    }

    pub fn ports(&self) -> &[ShapeId] {
        &self.ports
    }

    /// Every shape of the gate: handle, label, then ports
    pub fn shapes(&self) -> Vec<ShapeId> {
        let mut shapes = vec![self.handle, self.label];
        shapes.extend_from_slice(&self.ports);
        shapes
    }
}
