use approx::assert_abs_diff_eq;
use glam::Vec3;
use poli_solid::{
    AttributeSlot, BufferGeometry, DeviceError, Geometry, GeometryOptions, HostDevice, Mesh,
    MeshError, Polyhedron, RegularOctahedron, ShadingMode, SquarePyramid, UploadRecord,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn solids() -> Vec<(&'static str, Box<dyn Geometry>)> {
    let pyramid: Box<dyn Geometry> = Box::new(SquarePyramid::default());
    let octahedron: Box<dyn Geometry> = Box::new(RegularOctahedron::default());
    let tetrahedron: Box<dyn Geometry> = Box::new(Polyhedron::tetrahedron(1.0));
    let cube: Box<dyn Geometry> = Box::new(Polyhedron::cube(1.0));

    vec![
        ("pyramid", pyramid),
        ("octahedron", octahedron),
        ("tetrahedron", tetrahedron),
        ("cube", cube),
    ]
}

fn build(geometry: &dyn Geometry) -> BufferGeometry {
    BufferGeometry::from_topology(geometry.topology(), &GeometryOptions::default())
}

fn range(mesh: &Mesh<HostDevice>, slot: AttributeSlot) -> std::ops::Range<usize> {
    let range = mesh.layout().range(slot);
    range.start as usize..range.end as usize
}

#[test]
fn group_tables_partition_the_instances() {
    init();

    let expected = [
        ("pyramid", 16, 5),
        ("octahedron", 24, 6),
        ("tetrahedron", 12, 4),
        ("cube", 24, 8),
    ];

    for ((name, solid), (expected_name, instances, groups)) in solids().into_iter().zip(expected) {
        assert_eq!(name, expected_name);

        let topology = solid.topology();
        assert_eq!(topology.instance_count(), instances, "{name}");
        assert_eq!(topology.groups.len(), groups, "{name}");
        assert_eq!(topology.validate(), Ok(()), "{name}");
    }
}

#[test]
fn index_counts_match_the_scenarios() {
    init();

    let pyramid = build(&SquarePyramid::default());
    assert_eq!(pyramid.vertex_count(), 16);
    assert_eq!(pyramid.triangle_count(), 6);
    assert_eq!(pyramid.index_count(), 18);

    let octahedron = build(&RegularOctahedron::default());
    assert_eq!(octahedron.vertex_count(), 24);
    assert_eq!(octahedron.index_count(), 24);
    assert!(octahedron.groups.iter().all(|group| group.len() == 4));
}

#[test]
fn triangle_corners_share_the_flat_normal() {
    init();

    for (name, solid) in solids() {
        let geometry = build(solid.as_ref());

        for triangle in geometry.indices.chunks(3) {
            let normals: Vec<Vec3> = triangle
                .iter()
                .map(|&i| geometry.instance(i as usize).unwrap().normal)
                .collect();

            assert_eq!(normals[0], normals[1], "{name}");
            assert_eq!(normals[1], normals[2], "{name}");
        }
    }
}

#[test]
fn smooth_normals_are_unrenormalized_group_means() {
    init();

    for (name, solid) in solids() {
        let mut geometry = build(solid.as_ref());
        geometry.set_shading(ShadingMode::Smooth);

        for group in geometry.groups.iter() {
            let mean = group
                .iter()
                .map(|&i| geometry.instance(i as usize).unwrap().face_normal)
                .sum::<Vec3>()
                / group.len() as f32;

            let first = geometry.instance(group[0] as usize).unwrap().normal;
            assert_abs_diff_eq!(first, mean, epsilon = 1e-6);

            for &i in group {
                assert_eq!(geometry.instance(i as usize).unwrap().normal, first, "{name}");
            }
        }
    }
}

#[test]
fn octahedron_apex_mean_is_shorter_than_unit() {
    init();

    let geometry = build(&RegularOctahedron::default());
    let apex = geometry.instance(0).unwrap().vertex_normal;

    assert_abs_diff_eq!(apex, Vec3::new(0.0, 1.0 / 3f32.sqrt(), 0.0), epsilon = 1e-6);
    assert!((apex.length() - 1.0).abs() > 0.4);
}

#[test]
fn flat_smooth_flat_restores_flat_normals_exactly() {
    init();

    let mut device = HostDevice::new();
    let mut mesh = Mesh::new(&mut device, build(&RegularOctahedron::default())).unwrap();
    let original = device.contents(mesh.vertex_buffer()).unwrap().to_vec();

    mesh.set_shading(&mut device, ShadingMode::Smooth).unwrap();
    assert_eq!(mesh.geometry().normal, mesh.geometry().vertex_normal);

    mesh.set_shading(&mut device, ShadingMode::Flat).unwrap();
    assert_eq!(mesh.geometry().normal, mesh.geometry().face_normal);
    assert_eq!(device.contents(mesh.vertex_buffer()).unwrap(), original.as_slice());

    mesh.release(&mut device);
}

#[test]
fn toggle_rewrites_only_the_normal_sub_range() {
    init();

    let mut device = HostDevice::new();
    let mut mesh = Mesh::new(&mut device, build(&SquarePyramid::default())).unwrap();
    let before = device.contents(mesh.vertex_buffer()).unwrap().to_vec();
    let indices_before = device.contents(mesh.index_buffer()).unwrap().to_vec();
    device.clear_uploads();

    mesh.toggle_shading(&mut device).unwrap();
    let after = device.contents(mesh.vertex_buffer()).unwrap();

    for slot in [AttributeSlot::Position, AttributeSlot::Color, AttributeSlot::TexCoord] {
        let range = range(&mesh, slot);
        assert_eq!(after[range.clone()], before[range], "{slot:?}");
    }

    let normals = range(&mesh, AttributeSlot::Normal);
    assert_ne!(after[normals.clone()], before[normals.clone()]);
    assert_eq!(
        &after[normals],
        mesh.geometry().attribute_bytes(AttributeSlot::Normal)
    );
    assert_eq!(device.contents(mesh.index_buffer()).unwrap(), indices_before.as_slice());

    let normal_range = mesh.layout().range(AttributeSlot::Normal);
    assert_eq!(
        device.uploads(),
        &[UploadRecord {
            buffer: mesh.vertex_buffer().id(),
            offset: normal_range.start,
            len: normal_range.end - normal_range.start,
        }]
    );

    mesh.release(&mut device);
}

#[test]
fn meshes_on_separate_devices_are_independent() {
    init();

    let mut first = HostDevice::new();
    let mut second = HostDevice::new();

    let mut a = Mesh::new(&mut first, build(&SquarePyramid::default())).unwrap();
    let b = Mesh::new(&mut second, build(&SquarePyramid::default())).unwrap();
    second.clear_uploads();

    a.set_shading(&mut first, ShadingMode::Smooth).unwrap();

    assert!(second.uploads().is_empty());
    assert_eq!(b.shading(), ShadingMode::Flat);
    assert_ne!(
        first.contents(a.vertex_buffer()),
        second.contents(b.vertex_buffer())
    );

    a.release(&mut first);
    b.release(&mut second);
}

#[test]
fn allocation_failure_is_reported_and_leaks_nothing() {
    init();

    let mut device = HostDevice::with_capacity(64);
    let result = Mesh::new(&mut device, build(&Polyhedron::cube(1.0)));

    match result {
        Err(MeshError::DeviceAllocationFailure(DeviceError::Allocation { size, limit })) => {
            assert_eq!(size, 24 * 48);
            assert_eq!(limit, 64);
        }
        Err(err) => panic!("unexpected error: {err}"),
        Ok(_) => panic!("allocation should have failed"),
    }

    assert_eq!(device.live_buffers(), 0);
}

#[test]
fn labels_and_color_overrides_flow_to_the_mesh() {
    init();

    let options = GeometryOptions {
        color: Some([0.2, 0.4, 0.6, 1.0]),
        label: Some(String::from("pyramid")),
        ..Default::default()
    };

    let mut device = HostDevice::new();
    let mesh = Mesh::new(
        &mut device,
        BufferGeometry::from_geometry(&SquarePyramid::default(), &options),
    )
    .unwrap();

    assert_eq!(mesh.geometry().label.as_deref(), Some("pyramid"));

    let colors = range(&mesh, AttributeSlot::Color);
    assert_eq!(
        &device.contents(mesh.vertex_buffer()).unwrap()[colors],
        mesh.geometry().attribute_bytes(AttributeSlot::Color)
    );
    assert!(mesh
        .geometry()
        .color
        .chunks(4)
        .all(|c| c == [0.2, 0.4, 0.6, 1.0]));

    mesh.release(&mut device);
}
