use tracing::info;

use super::dto::NewFood;
use crate::store::Store;

struct SeedFood {
    name: &'static str,
    calories: i32,
    protein: i32,
    carbs: i32,
    fat: i32,
    serving_size: &'static str,
    food_group: &'static str,
    description: &'static str,
}

const DEFAULT_FOODS: [SeedFood; 10] = [
    SeedFood {
        name: "Greek Yogurt",
        calories: 130,
        protein: 23,
        carbs: 9,
        fat: 0,
        serving_size: "1 cup (227g)",
        food_group: "dairy",
        description: "Plain, non-fat strained yogurt",
    },
    SeedFood {
        name: "Chicken Breast",
        calories: 165,
        protein: 31,
        carbs: 0,
        fat: 4,
        serving_size: "100g",
        food_group: "protein",
        description: "Skinless, grilled",
    },
    SeedFood {
        name: "Salmon",
        calories: 208,
        protein: 20,
        carbs: 0,
        fat: 13,
        serving_size: "100g",
        food_group: "protein",
        description: "Atlantic, baked fillet",
    },
    SeedFood {
        name: "Quinoa",
        calories: 222,
        protein: 8,
        carbs: 39,
        fat: 4,
        serving_size: "1 cup cooked (185g)",
        food_group: "grains",
        description: "Cooked white quinoa",
    },
    SeedFood {
        name: "Avocado",
        calories: 240,
        protein: 3,
        carbs: 13,
        fat: 22,
        serving_size: "1 medium (150g)",
        food_group: "fruits",
        description: "Hass avocado, raw",
    },
    SeedFood {
        name: "Blueberries",
        calories: 84,
        protein: 1,
        carbs: 21,
        fat: 0,
        serving_size: "1 cup (148g)",
        food_group: "fruits",
        description: "Fresh wild blueberries",
    },
    SeedFood {
        name: "Spinach",
        calories: 7,
        protein: 1,
        carbs: 1,
        fat: 0,
        serving_size: "1 cup raw (30g)",
        food_group: "vegetables",
        description: "Baby spinach leaves",
    },
    SeedFood {
        name: "Sweet Potato",
        calories: 112,
        protein: 2,
        carbs: 26,
        fat: 0,
        serving_size: "1 medium (130g)",
        food_group: "vegetables",
        description: "Baked with skin",
    },
    SeedFood {
        name: "Almonds",
        calories: 164,
        protein: 6,
        carbs: 6,
        fat: 14,
        serving_size: "1 oz (28g)",
        food_group: "nuts",
        description: "Raw, unsalted",
    },
    SeedFood {
        name: "Oatmeal",
        calories: 154,
        protein: 5,
        carbs: 27,
        fat: 3,
        serving_size: "1 cup cooked (234g)",
        food_group: "grains",
        description: "Rolled oats cooked in water",
    },
];

/// Fills an empty catalog with the default foods. Returns how many were added.
pub async fn seed_default_foods(store: &dyn Store) -> anyhow::Result<usize> {
    if store.count_foods().await? > 0 {
        return Ok(0);
    }
    for f in &DEFAULT_FOODS {
        store
            .create_food(&NewFood {
                name: f.name.into(),
                calories: f.calories,
                protein: f.protein,
                carbs: f.carbs,
                fat: f.fat,
                serving_size: f.serving_size.into(),
                food_group: f.food_group.into(),
                description: Some(f.description.into()),
                image_url: None,
            })
            .await?;
    }
    info!(count = DEFAULT_FOODS.len(), "food catalog seeded");
    Ok(DEFAULT_FOODS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    #[tokio::test]
    async fn seeds_once() {
        let store = MemStore::new();
        assert_eq!(seed_default_foods(&store).await.unwrap(), 10);
        assert_eq!(seed_default_foods(&store).await.unwrap(), 0);
        assert_eq!(store.count_foods().await.unwrap(), 10);
    }
}
