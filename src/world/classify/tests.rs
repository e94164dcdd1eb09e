use crate::world::{CATEGORY_RULES, Category, Pattern, Species, basename, classify_model, classify_path, classify_species, yaw_degrees};

#[test]
fn rule_order_matches_category_priority() {
	let order: Vec<_> = CATEGORY_RULES.iter().map(|(category, _)| *category).collect();
	assert_eq!(order, Category::ALL[..9].to_vec());
	assert_eq!(Category::ALL[9], Category::Other);
}

#[test]
fn classifies_typical_paths() {
	let cases = [
		("DZ\\plants\\tree\\t_PiceaAbies_3s.p3d", Category::Tree),
		("dz\\plants\\bush\\b_corylusavellana_2s.p3d", Category::Bush),
		("dz\\plants\\clutter\\c_grass_tall.p3d", Category::Clutter),
		("dz\\rocks\\rock_granite4.p3d", Category::Rock),
		("dz\\structures\\residential\\misc\\house_2w01.p3d", Category::Building),
		("dz\\walls\\concrete_wall_1.p3d", Category::Wall),
		("dz\\vehicles\\wrecks\\datsun_burned.p3d", Category::Vehicle),
		("dz\\roads_bridges\\asf1_25.p3d", Category::Road),
		("dz\\infra\\misc\\powerline_pole_wood.p3d", Category::Infrastructure),
		("dz\\misc\\unknown_thing.p3d", Category::Other),
	];
	for (path, expected) in cases {
		assert_eq!(classify_path(path), expected, "path {path}");
	}
}

#[test]
fn earlier_rule_wins_when_several_match() {
	assert_eq!(classify_path("dz\\plants\\tree_bush_mix.p3d"), Category::Tree);
	assert_eq!(classify_path("dz\\plants\\bush\\grass_bush.p3d"), Category::Bush);
	assert_eq!(classify_path("dz\\misc\\grass_rock.p3d"), Category::Clutter);
	assert_eq!(classify_path("dz\\misc\\stone_wall.p3d"), Category::Rock);
	assert_eq!(classify_path("dz\\misc\\road_sign.p3d"), Category::Road);
}

#[test]
fn word_start_patterns_need_a_boundary() {
	assert!(Pattern::word("c_").matches("dz\\plants\\c_grass.p3d"));
	assert!(!Pattern::word("c_").matches("dz\\misc\\abc_thing.p3d"));
	assert!(Pattern::word("stone").matches("stone1.p3d"));
	assert_eq!(classify_path("dz\\misc\\gemstone.p3d"), Category::Other);
}

#[test]
fn word_start_prefix_after_separator_wins_over_later_rules() {
	assert_eq!(classify_path("dz\\structures\\x\\p_crate.p3d"), Category::Clutter);
	assert_eq!(classify_path("dz\\structures\\x\\crate.p3d"), Category::Building);
}

#[test]
fn anchored_patterns_need_anchor_first() {
	let pattern = Pattern::contains("bush").after("plants");
	assert!(pattern.matches("dz\\plants\\bush\\b_x.p3d"));
	assert!(!pattern.matches("bush\\plants.p3d"));
}

#[test]
fn lookahead_exclusions() {
	assert_eq!(classify_path("dz\\misc\\gateway_arch.p3d"), Category::Other);
	assert_eq!(classify_path("dz\\misc\\metal_gate.p3d"), Category::Wall);
	assert_eq!(classify_path("dz\\misc\\boat_small.p3d"), Category::Vehicle);
	assert_eq!(classify_path("dz\\misc\\boat_rack.p3d"), Category::Other);
	assert_eq!(classify_path("dz\\misc\\planet_globe.p3d"), Category::Other);
	assert_eq!(classify_path("dz\\misc\\plane_small.p3d"), Category::Vehicle);
	assert_eq!(classify_path("dz\\misc\\heli_crash.p3d"), Category::Vehicle);
}

#[test]
fn negated_next_byte() {
	let pattern = Pattern::contains("rosa").next_byte_not(b'_');
	assert!(pattern.matches("rosacanina.p3d"));
	assert!(!pattern.matches("rosa_x.p3d"));
	assert!(!pattern.matches("rosa"));
}

#[test]
fn clutter_is_the_only_excluded_category() {
	let excluded: Vec<_> = Category::ALL.into_iter().filter(|category| category.is_excluded()).collect();
	assert_eq!(excluded, vec![Category::Clutter]);
}

#[test]
fn species_from_basename() {
	assert_eq!(classify_species("dz\\plants\\tree\\t_PiceaAbies_3s.p3d"), Species::Conifer);
	assert_eq!(classify_species("dz\\plants\\tree\\t_betulapendula_2f.p3d"), Species::Broadleaf);
	assert_eq!(classify_species("dz\\plants\\tree\\t_palm_1.p3d"), Species::Other);
	assert_eq!(classify_species("dz\\plants\\picea\\t_palm_1.p3d"), Species::Other, "directory names are ignored");
}

#[test]
fn conifer_checked_before_broadleaf() {
	assert_eq!(classify_species("t_firbirch.p3d"), Species::Conifer);
}

#[test]
fn species_only_for_trees() {
	let tree = classify_model("plants\\t_picea.p3d");
	assert_eq!(tree.category, Category::Tree);
	assert_eq!(tree.species, Some(Species::Conifer));

	let rock = classify_model("dz\\rocks\\rock1.p3d");
	assert_eq!(rock.species, None);
}

#[test]
fn species_codes_and_strides() {
	assert_eq!(Species::Conifer.code(), 0);
	assert_eq!(Species::Broadleaf.code(), 1);
	assert_eq!(Species::Other.code(), 2);
	assert_eq!(Category::Tree.stride(), 5);
	assert_eq!(Category::Rock.stride(), 4);
}

#[test]
fn basename_splits_both_separators() {
	assert_eq!(basename("dz\\plants/tree\\t_a.p3d"), "t_a.p3d");
	assert_eq!(basename("a/b.p3d"), "b.p3d");
	assert_eq!(basename("plain.p3d"), "plain.p3d");
}

#[test]
fn yaw_from_right_vector() {
	assert!((yaw_degrees([1.0, 0.0, 0.0]) - 90.0).abs() < 1e-4);
	assert!(yaw_degrees([0.0, 0.0, 1.0]).abs() < 1e-4);
	assert!((yaw_degrees([-1.0, 0.0, 0.0]) + 90.0).abs() < 1e-4);
	assert!((yaw_degrees([0.0, 0.0, -1.0]) - 180.0).abs() < 1e-4);
}
