use std::{mem::size_of, ops::Range};

/// The four vertex attributes every solid carries, in buffer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeSlot {
    /// Vertex position, three floats.
    Position,
    /// Active normal, three floats.
    Normal,
    /// RGBA color, four floats.
    Color,
    /// Texture coordinates, two floats.
    TexCoord,
}

static POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: 0,
}];

static NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: 1,
}];

static COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x4,
    offset: 0,
    shader_location: 2,
}];

static TEX_COORD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x2,
    offset: 0,
    shader_location: 3,
}];

impl AttributeSlot {
    /// All slots in the order their sub-ranges appear in the vertex buffer.
    pub const ALL: [AttributeSlot; 4] = [
        AttributeSlot::Position,
        AttributeSlot::Normal,
        AttributeSlot::Color,
        AttributeSlot::TexCoord,
    ];

    /// The `@location` the shader reads this attribute from. Also used as the
    /// vertex buffer slot.
    pub const fn shader_location(self) -> u32 {
        match self {
            AttributeSlot::Position => 0,
            AttributeSlot::Normal => 1,
            AttributeSlot::Color => 2,
            AttributeSlot::TexCoord => 3,
        }
    }

    /// Number of `f32` components per vertex.
    pub const fn components(self) -> usize {
        match self {
            AttributeSlot::Position | AttributeSlot::Normal => 3,
            AttributeSlot::Color => 4,
            AttributeSlot::TexCoord => 2,
        }
    }

    /// Size of one element in bytes.
    pub const fn element_size(self) -> u64 {
        (self.components() * size_of::<f32>()) as u64
    }

    /// WGPU vertex format of the attribute.
    pub const fn format(self) -> wgpu::VertexFormat {
        match self {
            AttributeSlot::Position | AttributeSlot::Normal => wgpu::VertexFormat::Float32x3,
            AttributeSlot::Color => wgpu::VertexFormat::Float32x4,
            AttributeSlot::TexCoord => wgpu::VertexFormat::Float32x2,
        }
    }

    fn attributes(self) -> &'static [wgpu::VertexAttribute] {
        match self {
            AttributeSlot::Position => &POSITION_ATTRIBUTES,
            AttributeSlot::Normal => &NORMAL_ATTRIBUTES,
            AttributeSlot::Color => &COLOR_ATTRIBUTES,
            AttributeSlot::TexCoord => &TEX_COORD_ATTRIBUTES,
        }
    }
}

/// Where one attribute lives inside the combined vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBinding {
    /// Which attribute.
    pub slot: AttributeSlot,
    /// Shader location, see [`AttributeSlot::shader_location`].
    pub shader_location: u32,
    /// Number of `f32` components.
    pub components: usize,
    /// Byte offset of the attribute's sub-range.
    pub offset: u64,
    /// Declared stride. Always `0`: the sub-range is tightly packed.
    pub stride: u64,
}

/// By-attribute layout of the combined vertex buffer: all positions, then all
/// normals, then all colors, then all texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    vertex_count: u64,
}

impl AttributeLayout {
    /// Layout for `vertex_count` vertex instances.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count: vertex_count as u64,
        }
    }

    /// Number of vertex instances covered by the layout.
    pub fn vertex_count(&self) -> u64 {
        self.vertex_count
    }

    /// Size of the sub-range of `slot` in bytes.
    pub fn size(&self, slot: AttributeSlot) -> u64 {
        self.vertex_count * slot.element_size()
    }

    /// Byte offset of the sub-range of `slot`.
    pub fn offset(&self, slot: AttributeSlot) -> u64 {
        AttributeSlot::ALL
            .iter()
            .take_while(|&&other| other != slot)
            .map(|&other| self.size(other))
            .sum()
    }

    /// Byte range of the sub-range of `slot`.
    pub fn range(&self, slot: AttributeSlot) -> Range<u64> {
        let offset = self.offset(slot);
        offset..offset + self.size(slot)
    }

    /// Size of the whole combined buffer in bytes.
    pub fn total_size(&self) -> u64 {
        AttributeSlot::ALL.iter().map(|&slot| self.size(slot)).sum()
    }

    /// The four attribute bindings in buffer order.
    pub fn bindings(&self) -> [AttributeBinding; 4] {
        AttributeSlot::ALL.map(|slot| AttributeBinding {
            slot,
            shader_location: slot.shader_location(),
            components: slot.components(),
            offset: self.offset(slot),
            stride: 0,
        })
    }

    /// Vertex buffer layouts for a render pipeline consuming this layout. Each
    /// attribute is its own vertex buffer slot, bound to its sub-range of the
    /// combined buffer. WGPU has no "stride 0", so the tight element size is
    /// used instead.
    pub fn vertex_buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 4] {
        AttributeSlot::ALL.map(|slot| wgpu::VertexBufferLayout {
            array_stride: slot.element_size(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: slot.attributes(),
        })
    }
}
