use glam::Vec4;
use super::*;

#[test]
fn test_record_is_64_bytes() {
    assert_eq!(std::mem::size_of::<ShaderEntity>(), 64);
    assert_eq!(std::mem::align_of::<ShaderEntity>(), 4);
}

#[test]
fn test_header_layout_is_contiguous_u32_pairs() {
    assert_eq!(std::mem::size_of::<EntityArrayHeader>(), 32);
}

#[test]
fn test_index_packing_round_trips() {
    let mut entity = ShaderEntity::zeroed();
    entity.set_indices(1234, 7);
    assert_eq!(entity.matrix_index(), 1234);
    assert_eq!(entity.secondary_index(), 7);

    entity.set_indices(INDEX_NONE, INDEX_NONE);
    assert_eq!(entity.matrix_index(), INDEX_NONE);
    assert_eq!(entity.secondary_index(), INDEX_NONE);
}

#[test]
fn test_pack_color_channels() {
    assert_eq!(pack_color(Vec4::new(1.0, 0.0, 0.0, 0.0)), 0x0000_00FF);
    assert_eq!(pack_color(Vec4::new(0.0, 1.0, 0.0, 0.0)), 0x0000_FF00);
    assert_eq!(pack_color(Vec4::new(0.0, 0.0, 1.0, 0.0)), 0x00FF_0000);
    assert_eq!(pack_color(Vec4::new(0.0, 0.0, 0.0, 1.0)), 0xFF00_0000);
    assert_eq!(pack_color(Vec4::ONE), 0xFFFF_FFFF);
}

#[test]
fn test_pack_color_clamps_out_of_range() {
    assert_eq!(pack_color(Vec4::new(2.0, -1.0, 0.5, 1.5)), pack_color(Vec4::new(1.0, 0.0, 0.5, 1.0)));
}
