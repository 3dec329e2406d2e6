//! Gloss and Average Normal Length

use baker_core::bake::Baker;
use baker_core::color::Rgba;
use baker_core::error::BakeError;
use baker_core::geometry::*;
use baker_core::low_discrepancy::HammersleySequence;
use baker_core::math::*;
use baker_core::microfacet::*;

/// Number of half-vectors averaged per gloss value.
pub const GLOSS_NORMAL_SAMPLE_COUNT: usize = 8192;

/// Number of gloss buckets in the table.
pub const GLOSS_NORMAL_TABLE_SIZE: usize = 256;

/// Resolution of the gloss combination table.
pub const GLOSS_COMBINE_RESOLUTION: usize = 256;

/// Largest bucket index.
const MAX_BUCKET: usize = GLOSS_NORMAL_TABLE_SIZE - 1;

/// Returns the length of the average GGX half-vector for the given gloss.
/// Rougher surfaces spread their normals more and give shorter averages.
///
/// * `gloss`    - Surface gloss in [0, 1].
/// * `sequence` - Hammersley sequence cache.
pub fn integrate_gloss_normal(gloss: Float, sequence: &mut HammersleySequence) -> Float {
    let n = Vector3f::new(0.0, 0.0, 1.0);
    let alpha2 = gloss_to_alpha2(gloss);

    let mut sum = Vector3d::zero();
    for i in 0..GLOSS_NORMAL_SAMPLE_COUNT {
        let xi = sequence.sample_at(i, GLOSS_NORMAL_SAMPLE_COUNT);
        sum += Vector3d::from(importance_sample_ggx(&xi, alpha2, &n));
    }

    (sum / GLOSS_NORMAL_SAMPLE_COUNT as f64).length() as Float
}

/// Average normal length per gloss bucket. Bucket `i` holds the length for
/// gloss `i / 255` so lengths are non-decreasing with the bucket index.
#[derive(Clone, Debug, PartialEq)]
pub struct GlossNormalTable {
    lengths: Vec<Float>,
}

impl GlossNormalTable {
    /// Build the table by integrating every gloss bucket.
    ///
    /// * `sequence` - Hammersley sequence cache.
    pub fn build(sequence: &mut HammersleySequence) -> Self {
        let lengths = (0..GLOSS_NORMAL_TABLE_SIZE)
            .map(|i| integrate_gloss_normal(i as Float / MAX_BUCKET as Float, sequence))
            .collect();
        Self { lengths }
    }

    /// Returns the normal lengths.
    pub fn lengths(&self) -> &[Float] {
        &self.lengths
    }

    /// Returns the gloss whose average normal length matches `normal_length`.
    /// This is the first bucket whose successor exceeds the query, or 1 if no
    /// bucket does.
    ///
    /// * `normal_length` - Average normal length.
    pub fn lookup_gloss(&self, normal_length: Float) -> Float {
        self.lengths
            .windows(2)
            .position(|w| w[1] > normal_length)
            .map_or(1.0, |i| i as Float / MAX_BUCKET as Float)
    }

    /// Returns the gloss of a surface whose normal variation combines two
    /// layers with the given glosses, as an opaque grey colour.
    ///
    /// * `gloss_x` - Gloss of the first layer.
    /// * `gloss_y` - Gloss of the second layer.
    pub fn combine(&self, gloss_x: Float, gloss_y: Float) -> Rgba {
        let len_x = self.lengths[bucket(gloss_x)];
        let len_y = self.lengths[bucket(gloss_y)];
        Rgba::grey(self.lookup_gloss(len_x * len_y))
    }

    /// Returns the table as a C array literal with 16 values per line.
    pub fn to_cpp_array(&self) -> String {
        let mut s = String::from("static float s_averageGlossToNormalLength[] = {");
        for (i, len) in self.lengths.iter().enumerate() {
            if i % 16 == 0 {
                s.push_str("\n    ");
            }
            s.push_str(&format!("{len:.8}f, "));
        }
        s.push_str("\n};\n");
        s
    }

    /// Returns `gloss,length` rows.
    pub fn to_csv_rows(&self) -> Vec<Vec<String>> {
        self.lengths
            .iter()
            .enumerate()
            .map(|(i, len)| {
                let gloss = i as Float / MAX_BUCKET as Float;
                vec![format!("{gloss:.4}"), format!("{len:.8}")]
            })
            .collect()
    }
}

/// Returns the bucket for a gloss value, truncating towards zero.
///
/// * `gloss` - Gloss in [0, 1].
#[inline]
fn bucket(gloss: Float) -> usize {
    min((gloss * MAX_BUCKET as Float) as usize, MAX_BUCKET)
}

/// Owns the gloss/normal table once it has been built.
#[derive(Clone, Debug, Default)]
pub struct GlossNormal {
    table: Option<GlossNormalTable>,
}

impl GlossNormal {
    /// Create a new `GlossNormal` without a table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table, replacing any previous one.
    ///
    /// * `sequence` - Hammersley sequence cache.
    pub fn build_table(&mut self, sequence: &mut HammersleySequence) -> &GlossNormalTable {
        info!("Integrating gloss to average normal length table");
        self.table.insert(GlossNormalTable::build(sequence))
    }

    /// Returns the table if it has been built.
    pub fn table(&self) -> Result<&GlossNormalTable, BakeError> {
        self.table.as_ref().ok_or(BakeError::MissingGlossTable)
    }

    /// See `GlossNormalTable::lookup_gloss`.
    ///
    /// * `normal_length` - Average normal length.
    pub fn lookup_gloss(&self, normal_length: Float) -> Result<Float, BakeError> {
        Ok(self.table()?.lookup_gloss(normal_length))
    }

    /// See `GlossNormalTable::combine`.
    ///
    /// * `gloss_x` - Gloss of the first layer.
    /// * `gloss_y` - Gloss of the second layer.
    pub fn combine(&self, gloss_x: Float, gloss_y: Float) -> Result<Rgba, BakeError> {
        Ok(self.table()?.combine(gloss_x, gloss_y))
    }
}

/// Build the gloss/normal table, write it as C source and CSV and bake the
/// gloss combination table.
///
/// * `baker`        - The bake driver.
/// * `gloss_normal` - Owner of the gloss/normal table.
/// * `sequence`     - Hammersley sequence cache.
pub fn bake_gloss_normal(
    baker: &Baker,
    gloss_normal: &mut GlossNormal,
    sequence: &mut HammersleySequence,
) -> Result<(), BakeError> {
    let table = gloss_normal.build_table(sequence);
    baker.write_text("gloss_normal_length.cpp", &table.to_cpp_array())?;
    baker.write_csv("gloss_normal_length.csv", table.to_csv_rows())?;

    let table = gloss_normal.table()?;
    baker.image_2d("gloss_combine.png", GLOSS_COMBINE_RESOLUTION, |x, y| table.combine(x, y))?;
    Ok(())
}
