use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::world::{Category, ModelClass, ModelTable, ObjectRecord, Species, basename, classify_model, yaw_degrees};

/// Maximum number of distinct model basenames kept per category.
pub const MAX_MODEL_SAMPLES: usize = 30;

/// One kept object, ready to append to its category buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedPoint {
	/// Resolved category.
	pub category: Category,
	/// World position.
	pub position: [f32; 3],
	/// Rotation about the vertical axis in degrees.
	pub yaw: f32,
	/// Tree species, set only for trees.
	pub species: Option<Species>,
}

impl ClassifiedPoint {
	/// Combine a decoded record with the class of its model.
	pub fn new(record: &ObjectRecord, class: ModelClass) -> Self {
		Self {
			category: class.category,
			position: record.position,
			yaw: yaw_degrees(record.right),
			species: class.species,
		}
	}
}

/// Objects dropped during assembly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkipStats {
	/// Records with model index 0 or out of range.
	pub no_model: usize,
	/// Records classified into an excluded category.
	pub clutter: usize,
}

impl SkipStats {
	/// Total dropped records.
	pub fn total(&self) -> usize {
		self.no_model + self.clutter
	}
}

/// Columnar `f32` buffer for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBuffer {
	/// Category stored in this buffer.
	pub category: Category,
	/// Flat `[x, y, z, yaw]` (or `[x, y, z, yaw, species]` for trees) values.
	pub values: Vec<f32>,
	/// Number of records.
	pub count: usize,
	/// Distinct model basenames in first-seen order, capped at [`MAX_MODEL_SAMPLES`].
	pub models: Vec<String>,
}

impl CategoryBuffer {
	fn new(category: Category) -> Self {
		Self {
			category,
			values: Vec::new(),
			count: 0,
			models: Vec::new(),
		}
	}

	fn push(&mut self, point: &ClassifiedPoint, model: &str) {
		let [x, y, z] = point.position;
		self.values.extend_from_slice(&[x, y, z, point.yaw]);
		if self.category == Category::Tree {
			let species = point.species.unwrap_or(Species::Other);
			self.values.push(f32::from(species.code()));
		}
		self.count += 1;

		if self.models.len() < MAX_MODEL_SAMPLES && !self.models.iter().any(|seen| seen == model) {
			self.models.push(model.to_owned());
		}
	}

	/// Number of `f32` values per record.
	pub fn stride(&self) -> usize {
		self.category.stride()
	}

	/// Output file name for this buffer.
	pub fn file_name(&self) -> String {
		format!("objects-{}.bin", self.category.as_str())
	}

	/// Encode values as little-endian `f32` bytes.
	pub fn to_le_bytes(&self) -> Vec<u8> {
		self.values.iter().flat_map(|value| value.to_le_bytes()).collect()
	}
}

/// Classifies records and accumulates per-category buffers for one parse.
pub struct Assembler<'a> {
	models: &'a ModelTable,
	classes: Vec<ModelClass>,
	buffers: BTreeMap<Category, CategoryBuffer>,
	skipped: SkipStats,
}

impl<'a> Assembler<'a> {
	/// Pre-classify every model path in `models`.
	pub fn new(models: &'a ModelTable) -> Self {
		Self {
			models,
			classes: models.paths.iter().map(|path| classify_model(path)).collect(),
			buffers: BTreeMap::new(),
			skipped: SkipStats::default(),
		}
	}

	/// Class of `model_index`, or `None` when the record has no model.
	pub fn class_of(&self, model_index: u32) -> Option<ModelClass> {
		self.models.get(model_index)?;
		self.classes.get(model_index as usize).copied()
	}

	/// Classify one record and append it, or count it as skipped.
	pub fn push(&mut self, record: &ObjectRecord) {
		let (Some(path), Some(class)) = (self.models.get(record.model_index), self.class_of(record.model_index)) else {
			self.skipped.no_model += 1;
			return;
		};
		if class.category.is_excluded() {
			self.skipped.clutter += 1;
			return;
		}

		let point = ClassifiedPoint::new(record, class);
		self.buffers
			.entry(class.category)
			.or_insert_with(|| CategoryBuffer::new(class.category))
			.push(&point, basename(path));
	}

	/// Finish the pass, ordering buffers by record count (largest first).
	pub fn finish(self, world_size: f32) -> Extraction {
		let mut buffers: Vec<_> = self.buffers.into_values().collect();
		buffers.sort_by(|left, right| right.count.cmp(&left.count));
		Extraction {
			world_size,
			buffers,
			skipped: self.skipped,
		}
	}
}

/// Result of one full extraction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
	/// World extent in meters.
	pub world_size: f32,
	/// Non-empty category buffers, largest first.
	pub buffers: Vec<CategoryBuffer>,
	/// Dropped-record tallies.
	pub skipped: SkipStats,
}

impl Extraction {
	/// Number of kept objects across all categories.
	pub fn total_objects(&self) -> usize {
		self.buffers.iter().map(|buffer| buffer.count).sum()
	}

	/// Buffer for `category`, if any object was kept for it.
	pub fn buffer(&self, category: Category) -> Option<&CategoryBuffer> {
		self.buffers.iter().find(|buffer| buffer.category == category)
	}

	/// Build the summary manifest.
	pub fn manifest(&self) -> Manifest {
		let categories = self
			.buffers
			.iter()
			.map(|buffer| {
				let species = (buffer.category == Category::Tree).then(|| Species::ALL.into_iter().map(|item| (item.code(), item.as_str())).collect());
				let entry = CategoryEntry {
					count: buffer.count,
					file: buffer.file_name(),
					stride: buffer.stride(),
					models: buffer.models.clone(),
					species,
				};
				(buffer.category.as_str().to_owned(), entry)
			})
			.collect();

		Manifest {
			world_size: self.world_size,
			total_objects: self.total_objects(),
			categories,
		}
	}
}

/// Summary written next to the category buffers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
	/// World extent in meters.
	pub world_size: f32,
	/// Number of kept objects.
	pub total_objects: usize,
	/// Per-category entries, largest first.
	pub categories: IndexMap<String, CategoryEntry>,
}

/// Manifest entry for one category buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEntry {
	/// Number of records.
	pub count: usize,
	/// Buffer file name.
	pub file: String,
	/// `f32` values per record.
	pub stride: usize,
	/// Sample of model basenames.
	pub models: Vec<String>,
	/// Species code legend, trees only.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub species: Option<BTreeMap<u8, &'static str>>,
}

#[cfg(test)]
mod tests {
	use wrpdoc_testkit::Record;

	use crate::world::{Assembler, Category, ModelTable, ObjectRecord};

	fn table(paths: &[&str]) -> ModelTable {
		ModelTable {
			offset: 0,
			paths: paths.iter().map(|path| (*path).to_owned()).collect(),
			end_offset: 0,
		}
	}

	fn record(model_index: u32, position: [f32; 3], right: [f32; 3]) -> ObjectRecord {
		let raw = Record::new(model_index, position).with_right(right);
		ObjectRecord {
			object_id: raw.object_id,
			model_index: raw.model_index,
			right: raw.right,
			up: raw.up,
			forward: raw.forward,
			position: raw.position,
			tag: raw.tag,
		}
	}

	#[test]
	fn writes_fixed_field_order_per_stride() {
		let models = table(&["empty.p3d", "dz\\plants\\tree\\t_betula2s.p3d", "dz\\rocks\\rock1.p3d"]);
		let mut assembler = Assembler::new(&models);
		assembler.push(&record(1, [10.0, 20.0, 30.0], [1.0, 0.0, 0.0]));
		assembler.push(&record(2, [1.0, 2.0, 3.0], [0.0, 0.0, 1.0]));
		let extraction = assembler.finish(1000.0);

		let tree = extraction.buffer(Category::Tree).expect("tree buffer");
		assert_eq!(tree.stride(), 5);
		assert_eq!(tree.values.len(), 5);
		assert_eq!(&tree.values[..3], &[10.0, 20.0, 30.0]);
		assert!((tree.values[3] - 90.0).abs() < 1e-4);
		assert_eq!(tree.values[4], 1.0, "broadleaf code");

		let rock = extraction.buffer(Category::Rock).expect("rock buffer");
		assert_eq!(rock.stride(), 4);
		assert_eq!(rock.values, vec![1.0, 2.0, 3.0, 0.0]);
		assert_eq!(rock.file_name(), "objects-rock.bin");
		assert_eq!(rock.to_le_bytes().len(), 16);
	}

	#[test]
	fn drops_missing_models_and_clutter() {
		let models = table(&["dz\\rocks\\rock1.p3d", "dz\\plants\\clutter\\c_grass.p3d", "dz\\structures\\house.p3d"]);
		let mut assembler = Assembler::new(&models);
		for index in [0, 1, 1, 2, 3, 99] {
			assembler.push(&record(index, [5.0, 5.0, 5.0], [0.0, 0.0, 1.0]));
		}
		let extraction = assembler.finish(1.0);

		assert_eq!(extraction.skipped.no_model, 3);
		assert_eq!(extraction.skipped.clutter, 2);
		assert_eq!(extraction.skipped.total(), 5);
		assert_eq!(extraction.total_objects(), 1);
		assert!(extraction.buffer(Category::Clutter).is_none());
		assert!(extraction.buffer(Category::Rock).is_none(), "index 0 never kept");
		assert!(!extraction.manifest().categories.contains_key("clutter"));
	}

	#[test]
	fn orders_buffers_by_count_then_category() {
		let models = table(&["empty.p3d", "dz\\rocks\\rock1.p3d", "dz\\structures\\house.p3d", "dz\\walls\\wall1.p3d"]);
		let mut assembler = Assembler::new(&models);
		for index in [3, 2, 2, 1, 2, 3] {
			assembler.push(&record(index, [0.0; 3], [0.0, 0.0, 1.0]));
		}
		let extraction = assembler.finish(1.0);

		let order: Vec<_> = extraction.buffers.iter().map(|buffer| buffer.category).collect();
		assert_eq!(order, vec![Category::Building, Category::Wall, Category::Rock]);
		let keys: Vec<_> = extraction.manifest().categories.keys().cloned().collect();
		assert_eq!(keys, vec!["building", "wall", "rock"]);
	}

	#[test]
	fn caps_distinct_model_samples() {
		let mut paths = vec!["empty.p3d".to_owned()];
		paths.extend((0..40).map(|i| format!("dz\\rocks\\rock_{i}.p3d")));
		let models = ModelTable {
			offset: 0,
			paths,
			end_offset: 0,
		};
		let mut assembler = Assembler::new(&models);
		for index in 1..=40 {
			assembler.push(&record(index, [0.0; 3], [0.0, 0.0, 1.0]));
			assembler.push(&record(index, [0.0; 3], [0.0, 0.0, 1.0]));
		}
		let extraction = assembler.finish(1.0);

		let rock = extraction.buffer(Category::Rock).expect("rock buffer");
		assert_eq!(rock.count, 80);
		assert_eq!(rock.models.len(), 30);
		assert_eq!(rock.models[0], "rock_0.p3d");
	}

	#[test]
	fn manifest_carries_species_legend_for_trees_only() {
		let models = table(&["empty.p3d", "plants\\t_picea.p3d", "dz\\rocks\\rock1.p3d"]);
		let mut assembler = Assembler::new(&models);
		assembler.push(&record(1, [0.0; 3], [0.0, 0.0, 1.0]));
		assembler.push(&record(2, [0.0; 3], [0.0, 0.0, 1.0]));
		let manifest = assembler.finish(16384.0).manifest();

		let json = serde_json::to_value(&manifest).expect("manifest serializes");
		assert_eq!(json["worldSize"], 16384.0);
		assert_eq!(json["totalObjects"], 2);
		assert_eq!(json["categories"]["tree"]["stride"], 5);
		assert_eq!(json["categories"]["tree"]["file"], "objects-tree.bin");
		assert_eq!(json["categories"]["tree"]["species"]["0"], "conifer");
		assert_eq!(json["categories"]["tree"]["species"]["2"], "other");
		assert_eq!(json["categories"]["tree"]["models"][0], "t_picea.p3d");
		assert!(json["categories"]["rock"].get("species").is_none());
	}
}
