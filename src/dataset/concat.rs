use std::collections::HashMap;

use super::types::{Coordinate, Dataset, TimeCoordinate, Values, Variable};
use super::DatasetError;

/// Union of several coordinate grids, sorted ascending and deduplicated.
fn union_grid(grids: &[&[f64]]) -> Vec<f64> {
    let mut values: Vec<f64> = grids.iter().flat_map(|g| g.iter().copied()).collect();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| a.total_cmp(b).is_eq());
    values
}

/// Position of every value of `grid` within `union`
fn grid_positions(grid: &[f64], union: &[f64]) -> Vec<usize> {
    grid.iter()
        .map(|v| union.partition_point(|u| u.total_cmp(v).is_lt()))
        .collect()
}

/// Concatenate datasets along `DATETIME`.
///
/// Coordinates that differ between inputs are replaced by the sorted union of
/// their values and every profile is remapped onto that grid (outer join).
/// Variables absent from one input are filled with NaN or empty strings for
/// its rows. Global and time attributes are taken from the first input.
pub fn concat_time(datasets: &[Dataset]) -> Result<Dataset, DatasetError> {
    let first = datasets.first().ok_or(DatasetError::NothingToConcatenate)?;
    for ds in datasets {
        ds.validate()?;
    }

    // Coordinates, in order of first appearance
    let mut coord_order: Vec<&Coordinate> = Vec::new();
    for ds in datasets {
        for coord in &ds.coords {
            if !coord_order.iter().any(|c| c.name == coord.name) {
                coord_order.push(coord);
            }
        }
    }
    let mut coords = Vec::with_capacity(coord_order.len());
    for template in coord_order {
        let grids: Vec<&[f64]> = datasets
            .iter()
            .filter_map(|ds| ds.coordinate(&template.name))
            .map(|c| c.values.as_slice())
            .collect();
        let identical = grids.windows(2).all(|w| w[0] == w[1]);
        let values = if identical {
            template.values.clone()
        } else {
            union_grid(&grids)
        };
        coords.push(Coordinate {
            name: template.name.clone(),
            values,
            attrs: template.attrs.clone(),
        });
    }

    // Variable templates, in order of first appearance
    let mut templates: Vec<&Variable> = Vec::new();
    for ds in datasets {
        for variable in &ds.variables {
            match templates.iter().find(|t| t.name == variable.name) {
                Some(t) => {
                    if t.depth_dim != variable.depth_dim
                        || t.values.kind() != variable.values.kind()
                    {
                        return Err(DatasetError::IncompatibleVariable(variable.name.clone()));
                    }
                }
                None => templates.push(variable),
            }
        }
    }

    let coord_len: HashMap<&str, usize> = coords.iter().map(|c| (c.name.as_str(), c.len())).collect();
    let total_times: usize = datasets.iter().map(Dataset::num_times).sum();

    let mut variables = Vec::with_capacity(templates.len());
    for template in templates {
        let row_len = match &template.depth_dim {
            None => 1,
            Some(dim) => *coord_len.get(dim.as_str()).ok_or_else(|| {
                DatasetError::UnknownDimension {
                    name: template.name.clone(),
                    dim: dim.clone(),
                }
            })?,
        };
        let values = match &template.values {
            Values::Float(_) => {
                let mut out = Vec::with_capacity(total_times * row_len);
                for ds in datasets {
                    append_float_rows(&mut out, ds, template, &coords, row_len)?;
                }
                Values::Float(out)
            }
            Values::Text(_) => {
                let mut out = Vec::with_capacity(total_times);
                for ds in datasets {
                    match ds.variable(&template.name).and_then(|v| v.values.as_text()) {
                        Some(text) => out.extend_from_slice(text),
                        None => out.extend(std::iter::repeat(String::new()).take(ds.num_times())),
                    }
                }
                Values::Text(out)
            }
        };
        variables.push(Variable {
            name: template.name.clone(),
            depth_dim: template.depth_dim.clone(),
            values,
            attrs: template.attrs.clone(),
        });
    }

    let times = datasets
        .iter()
        .flat_map(|ds| ds.time.values.iter().copied())
        .collect();

    Ok(Dataset {
        time: TimeCoordinate {
            values: times,
            attrs: first.time.attrs.clone(),
        },
        coords,
        variables,
        attrs: first.attrs.clone(),
    })
}

fn append_float_rows(
    out: &mut Vec<f64>,
    ds: &Dataset,
    template: &Variable,
    coords: &[Coordinate],
    row_len: usize,
) -> Result<(), DatasetError> {
    let n = ds.num_times();
    let Some(values) = ds.variable(&template.name).and_then(|v| v.values.as_float()) else {
        out.extend(std::iter::repeat(f64::NAN).take(n * row_len));
        return Ok(());
    };
    let Some(dim) = template.depth_dim.as_deref() else {
        out.extend_from_slice(values);
        return Ok(());
    };

    let local = ds
        .coordinate(dim)
        .ok_or_else(|| DatasetError::UnknownDimension {
            name: template.name.clone(),
            dim: dim.to_string(),
        })?;
    let union = coords
        .iter()
        .find(|c| c.name == dim)
        .map(|c| c.values.as_slice())
        .unwrap_or_default();

    if local.values.as_slice() == union {
        out.extend_from_slice(values);
        return Ok(());
    }

    let positions = grid_positions(&local.values, union);
    let local_len = local.len();
    for row in 0..n {
        let start = out.len();
        out.extend(std::iter::repeat(f64::NAN).take(row_len));
        for (j, &pos) in positions.iter().enumerate() {
            out[start + pos] = values[row * local_len + j];
        }
    }
    Ok(())
}
